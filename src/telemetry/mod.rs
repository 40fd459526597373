// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Local observability for the monitor itself.
//!
//! - **Logging**: `tracing` subscriber setup for binaries and tests
//! - **Metrics**: per-tool call statistics kept in process
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the host application (or the `mcp-monitor` binary).

mod init;
pub mod metrics;

pub use init::{init_logging, LogConfig, LogGuard};
pub use metrics::{CallMetrics, MetricsSnapshot, ToolMetrics};
