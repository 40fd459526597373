// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Benchmarks for payload sanitization and wrapped-call overhead.
//!
//! Run with: `cargo bench --bench sanitize`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value};
use std::hint::black_box;

use mcp_monitor::sanitize::{sanitize_params, sanitize_response};
use mcp_monitor::{Monitor, MonitorOptions, RequestContext, ToolFn, ToolRegistrar, ToolRegistry};

/// Build a params object whose JSON is roughly `size` characters long.
fn payload(size: usize) -> Value {
    json!({ "text": "x".repeat(size.saturating_sub(11)) })
}

fn bench_sanitize(c: &mut Criterion) {
    let mut group = c.benchmark_group("sanitize");

    for size in [100usize, 4_000, 6_000, 50_000] {
        let value = payload(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("params", size), &value, |b, value| {
            b.iter(|| sanitize_params(Some(black_box(value))))
        });
        group.bench_with_input(BenchmarkId::new("response", size), &value, |b, value| {
            b.iter(|| sanitize_response(Some(black_box(value))))
        });
    }

    group.finish();
}

fn bench_wrapped_call(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let echo = || ToolFn::new(|params, _ctx| async move { Ok(params) });

    let mut plain = ToolRegistry::new();
    plain.tool("echo", vec![json!({}).into(), echo().into()]).unwrap();

    // No API key: measures interception without network traffic.
    let monitor = Monitor::new(MonitorOptions::default());
    let mut wrapped = monitor.wrap(ToolRegistry::new());
    wrapped.tool("echo", vec![json!({}).into(), echo().into()]).unwrap();

    let params = json!({"a": 1, "b": [1, 2, 3]});
    let mut group = c.benchmark_group("call");

    group.bench_function("unwrapped", |b| {
        b.iter(|| {
            rt.block_on(plain.call("echo", black_box(params.clone()), RequestContext::new()))
        })
    });
    group.bench_function("wrapped_disabled", |b| {
        b.iter(|| {
            rt.block_on(wrapped.call("echo", black_box(params.clone()), RequestContext::new()))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_sanitize, bench_wrapped_call);
criterion_main!(benches);
