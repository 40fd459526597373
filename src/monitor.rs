// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The monitor instance: wrapping, sessions and raw record submission.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::MonitorOptions;
use crate::error::MonitorError;
use crate::interceptor::{Instrumentation, MonitoredRegistrar};
use crate::record::LogRecord;
use crate::reporter::{LogSink, Reporter};
use crate::session::Session;
use crate::telemetry::{CallMetrics, MetricsSnapshot};
use crate::tools::ToolRegistrar;

/// Observes tool calls and reports them to the collector.
///
/// Without an API key the monitor is disabled: [`wrap`](Self::wrap) still
/// installs itself, but nothing is ever sent, and the session and raw-record
/// operations return [`MonitorError::MissingApiKey`].
pub struct Monitor {
    options: MonitorOptions,
    reporter: Option<Reporter>,
    instrumentation: Arc<Instrumentation>,
    metrics: Arc<CallMetrics>,
    session_counter: AtomicU64,
}

impl Monitor {
    /// Create a monitor reporting over HTTP.
    pub fn new(options: MonitorOptions) -> Self {
        let reporter = Reporter::from_options(&options);
        Self::build(options, reporter)
    }

    /// Create a monitor delivering records through a custom sink.
    ///
    /// The API key requirement still applies.
    pub fn with_sink(options: MonitorOptions, sink: Arc<dyn LogSink>) -> Self {
        let reporter = options
            .active_api_key()
            .map(|_| Reporter::with_sink(&options, sink));
        Self::build(options, reporter)
    }

    fn build(options: MonitorOptions, reporter: Option<Reporter>) -> Self {
        if reporter.is_none() {
            warn!("No API key provided; tool calls will not be reported");
        }
        if options.batch_size > 1 && options.debug {
            debug!(
                batch_size = options.batch_size,
                "Batching is not supported; records are sent one at a time"
            );
        }

        let metrics = Arc::new(CallMetrics::new());
        let instrumentation = Arc::new(Instrumentation {
            reporter: reporter.clone(),
            agent: options.agent.clone(),
            debug: options.debug,
            metrics: Arc::clone(&metrics),
        });

        Self {
            options,
            reporter,
            instrumentation,
            metrics,
            session_counter: AtomicU64::new(0),
        }
    }

    pub fn options(&self) -> &MonitorOptions {
        &self.options
    }

    /// Whether an API key was configured.
    pub fn is_active(&self) -> bool {
        self.reporter.is_some()
    }

    /// Install monitoring on a host registrar.
    ///
    /// Tools registered through the returned wrapper are instrumented; their
    /// results and errors are unchanged.
    pub fn wrap<R: ToolRegistrar>(&self, registrar: R) -> MonitoredRegistrar<R> {
        MonitoredRegistrar::install(registrar, Arc::clone(&self.instrumentation))
    }

    /// Start a new explicit session.
    ///
    /// Without a name the session is called `Session #N`, N counting the
    /// sessions created by this monitor.
    pub fn create_session(&self, name: Option<&str>) -> Result<Session, MonitorError> {
        let reporter = self.reporter.clone().ok_or(MonitorError::MissingApiKey)?;

        let sequence = self.session_counter.fetch_add(1, Ordering::SeqCst) + 1;
        let name = match name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Session #{sequence}"),
        };

        Ok(Session::new(
            name,
            self.options.agent.clone(),
            reporter,
            Arc::clone(&self.metrics),
        ))
    }

    /// Send a caller-built record, waiting for delivery.
    ///
    /// Delivery failures are absorbed like any other report.
    pub async fn send_log(&self, record: &LogRecord) -> Result<(), MonitorError> {
        let reporter = self.reporter.as_ref().ok_or(MonitorError::MissingApiKey)?;
        reporter.report(record).await;
        Ok(())
    }

    /// The underlying reporter, if the monitor is active.
    pub fn reporter(&self) -> Option<&Reporter> {
        self.reporter.as_ref()
    }

    /// Local call statistics gathered so far.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

impl std::fmt::Debug for Monitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Monitor")
            .field("options", &self.options)
            .field("active", &self.is_active())
            .field("sessions", &self.session_counter.load(Ordering::SeqCst))
            .finish()
    }
}
