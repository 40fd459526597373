// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;
use mcp_monitor::{LogRecord, LogSink, Monitor, MonitorOptions, ReportError};

/// Sink that keeps delivered records in memory.
#[derive(Default)]
pub struct RecordingSink {
    records: Mutex<Vec<LogRecord>>,
}

impl RecordingSink {
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Wait until at least `count` records arrived (detached reports).
    pub async fn wait_for(&self, count: usize) -> Vec<LogRecord> {
        for _ in 0..200 {
            let records = self.records();
            if records.len() >= count {
                return records;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("expected {} records, got {}", count, self.records().len());
    }
}

#[async_trait]
impl LogSink for RecordingSink {
    async fn deliver(&self, record: &LogRecord) -> Result<(), ReportError> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// Sink whose deliveries block until [`release`](Self::release) is called.
#[derive(Default)]
pub struct GatedSink {
    inner: RecordingSink,
    gate: Notify,
}

impl GatedSink {
    /// Let one pending (or the next) delivery through.
    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.inner.records()
    }

    pub async fn wait_for(&self, count: usize) -> Vec<LogRecord> {
        self.inner.wait_for(count).await
    }
}

#[async_trait]
impl LogSink for GatedSink {
    async fn deliver(&self, record: &LogRecord) -> Result<(), ReportError> {
        self.gate.notified().await;
        self.inner.deliver(record).await
    }
}

/// A monitor with a key, reporting into a fresh recording sink.
pub fn recording_monitor(options: MonitorOptions) -> (Monitor, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let monitor = Monitor::with_sink(options, sink.clone());
    (monitor, sink)
}
