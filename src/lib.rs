// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! mcp-monitor - call-level telemetry for tool handlers.
//!
//! Wrap a host's tool registrar once and every handler registered through it
//! reports its latency, outcome, arguments and result to a collector, while
//! behaving exactly as it did before.
//!
//! # Architecture
//!
//! - [`sanitize`] - Bounds payload size before transmission
//! - [`config`] - Options, environment and file loading
//! - [`reporter`] - Best-effort delivery of records (detached or joined)
//! - [`session`] - Explicit sessions with numbered steps
//! - [`interceptor`] - Registration shape detection and handler wrapping
//! - [`monitor`] - The [`Monitor`] tying it all together
//! - [`tools`] - The host-side registration contract and a small host
//! - [`telemetry`] - Local logging setup and call statistics
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_monitor::{Monitor, MonitorOptions};
//! use mcp_monitor::tools::{RequestContext, ToolFn, ToolRegistrar, ToolRegistry};
//! use serde_json::json;
//!
//! let monitor = Monitor::new(MonitorOptions::new("my-api-key").with_agent("calc"));
//! let mut server = monitor.wrap(ToolRegistry::new());
//!
//! server.tool("add", vec![
//!     json!({"a": "number", "b": "number"}).into(),
//!     ToolFn::new(|p, _| async move {
//!         Ok(json!(p["a"].as_i64().unwrap_or(0) + p["b"].as_i64().unwrap_or(0)))
//!     }).into(),
//! ])?;
//!
//! let sum = server.call("add", json!({"a": 1, "b": 2}), RequestContext::new()).await?;
//! assert_eq!(sum, json!(3));
//!
//! let session = monitor.create_session(Some("batch-1"))?;
//! session.track_call("add", &json!({"a": 1}), || async { Ok::<_, String>(1) }).await?;
//! ```

pub mod config;
pub mod error;
pub mod interceptor;
pub mod monitor;
pub mod record;
pub mod reporter;
pub mod sanitize;
pub mod session;
pub mod telemetry;
pub mod tools;

// Re-export commonly used types at crate root
pub use config::MonitorOptions;
pub use error::{BoxError, ConfigError, MonitorError, ReportError, ToolError};
pub use interceptor::{MonitoredRegistrar, RegistrationShape};
pub use monitor::Monitor;
pub use record::{CallStatus, LogRecord};
pub use reporter::{HttpSink, LogSink, ReportMode, Reporter};
pub use session::Session;
pub use tools::{RequestContext, ToolArg, ToolFn, ToolRegistrar, ToolRegistry};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_public_exports() {
        let _options = MonitorOptions::default();
        let _record = LogRecord::builder("test").build();
        let _ctx = RequestContext::new();
    }
}
