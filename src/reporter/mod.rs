// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Best-effort delivery of [`LogRecord`]s.
//!
//! The [`Reporter`] never surfaces a failure: a disabled reporter does
//! nothing, and a failed delivery is logged (in debug mode) and dropped.
//! Where a record goes is decided by a [`LogSink`]; [`HttpSink`] talks to the
//! collector.
//!
//! Records can be submitted in two modes:
//!
//! - [`ReportMode::Detached`] spawns the delivery and returns at once. The
//!   caller never observes when, or whether, it finished.
//! - [`ReportMode::Joined`] awaits the delivery before returning.

mod http;

pub use http::{HttpSink, API_KEY_HEADER};

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::MonitorOptions;
use crate::error::ReportError;
use crate::record::LogRecord;

/// Destination for telemetry records.
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Deliver one record.
    async fn deliver(&self, record: &LogRecord) -> Result<(), ReportError>;
}

/// How a record is handed to the reporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// Spawn delivery and continue immediately.
    Detached,
    /// Wait for delivery to finish.
    Joined,
}

/// Delivers records to a sink, absorbing every failure.
#[derive(Clone)]
pub struct Reporter {
    sink: Arc<dyn LogSink>,
    enabled: bool,
    debug: bool,
}

impl Reporter {
    /// Create a reporter delivering through `sink`.
    pub fn new(sink: Arc<dyn LogSink>, enabled: bool, debug: bool) -> Self {
        Self {
            sink,
            enabled,
            debug,
        }
    }

    /// Create a reporter from options using the HTTP sink.
    ///
    /// Returns `None` when no API key is configured.
    pub fn from_options(options: &MonitorOptions) -> Option<Self> {
        HttpSink::from_options(options)
            .map(|sink| Self::new(Arc::new(sink), options.enabled, options.debug))
    }

    /// Create a reporter from options with a custom sink.
    pub fn with_sink(options: &MonitorOptions, sink: Arc<dyn LogSink>) -> Self {
        Self::new(sink, options.enabled, options.debug)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Deliver `record`. Never fails; disabled reporters do nothing.
    pub async fn report(&self, record: &LogRecord) {
        if !self.enabled {
            return;
        }

        match self.sink.deliver(record).await {
            Ok(()) => {
                if self.debug {
                    debug!(
                        "Sent: {} [{}] {}ms",
                        record.tool, record.status, record.duration
                    );
                }
            }
            Err(ReportError::Status(status)) => {
                if self.debug {
                    debug!(tool = %record.tool, "Failed to send log: {}", status);
                }
            }
            Err(err) => {
                if self.debug {
                    debug!(tool = %record.tool, "Error sending log: {}", err);
                }
            }
        }
    }

    /// Submit `record` in the given mode.
    pub async fn submit(&self, record: LogRecord, mode: ReportMode) {
        match mode {
            ReportMode::Joined => self.report(&record).await,
            ReportMode::Detached => {
                self.detach(record);
            }
        }
    }

    /// Spawn delivery of `record` on the current tokio runtime.
    ///
    /// Outside a runtime the record is dropped.
    pub fn detach(&self, record: LogRecord) -> Option<JoinHandle<()>> {
        if !self.enabled {
            return None;
        }

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let reporter = self.clone();
                Some(handle.spawn(async move { reporter.report(&record).await }))
            }
            Err(_) => {
                if self.debug {
                    debug!(tool = %record.tool, "No async runtime; dropping log");
                }
                None
            }
        }
    }
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter")
            .field("enabled", &self.enabled)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}
