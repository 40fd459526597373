// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Explicit session tracking.
//!
//! A [`Session`] groups calls under one identity and numbers them. Unlike
//! wrapped handlers, [`Session::track_call`] waits for its record to be
//! delivered before handing the outcome back, so sequential calls on one
//! session report in order.

use std::fmt::Display;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug_span, Instrument};

use crate::record::{new_id, LogRecord};
use crate::reporter::{ReportMode, Reporter};
use crate::sanitize::to_payload;
use crate::telemetry::CallMetrics;

/// A group of tracked calls sharing an id and a name.
pub struct Session {
    id: String,
    name: String,
    step: AtomicU64,
    agent: String,
    reporter: Reporter,
    metrics: Arc<CallMetrics>,
}

impl Session {
    pub(crate) fn new(
        name: String,
        agent: String,
        reporter: Reporter,
        metrics: Arc<CallMetrics>,
    ) -> Self {
        Self {
            id: new_id(),
            name,
            step: AtomicU64::new(0),
            agent,
            reporter,
            metrics,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of calls tracked so far.
    pub fn steps(&self) -> u64 {
        self.step.load(Ordering::SeqCst)
    }

    /// Run `execute` as the next step of this session and report it.
    ///
    /// The record is delivered before this returns. The outcome of `execute`
    /// is returned untouched; on failure the error's `Display` text is what
    /// gets reported.
    pub async fn track_call<P, F, Fut, T, E>(
        &self,
        tool: &str,
        params: &P,
        execute: F,
    ) -> Result<T, E>
    where
        P: Serialize + ?Sized,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        T: Serialize,
        E: Display,
    {
        let step = self.step.fetch_add(1, Ordering::SeqCst) + 1;
        let start = Instant::now();

        let span = debug_span!("track_call", tool = %tool, session = %self.name, step);
        let outcome = execute().instrument(span).await;
        let duration = start.elapsed();

        let builder = LogRecord::builder(tool)
            .params(to_payload(params))
            .duration(duration)
            .agent(self.agent.as_str())
            .session(self.id.as_str(), self.name.as_str())
            .step(step);
        let record = match &outcome {
            Ok(value) => builder.success(to_payload(value)),
            Err(err) => builder.failure(err.to_string()),
        }
        .build();

        self.metrics.record(tool, duration, outcome.is_ok());
        self.reporter.submit(record, ReportMode::Joined).await;

        outcome
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("steps", &self.steps())
            .finish()
    }
}
