// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Local call statistics.
//!
//! Every [`Monitor`](crate::Monitor) keeps its own [`CallMetrics`], fed by
//! both wrapped handlers and explicit sessions. Nothing here is sent to the
//! collector; it is there for hosts that want a quick in-process summary.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

/// Per-tool call statistics for one monitor.
#[derive(Debug)]
pub struct CallMetrics {
    tools: RwLock<BTreeMap<String, ToolMetrics>>,
    start_time: Instant,
}

impl CallMetrics {
    pub fn new() -> Self {
        Self {
            tools: RwLock::new(BTreeMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Record one call of `tool`.
    pub fn record(&self, tool: &str, duration: Duration, success: bool) {
        let mut tools = self.tools.write().unwrap_or_else(PoisonError::into_inner);
        tools
            .entry(tool.to_string())
            .or_default()
            .record(duration, success);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            tools: self
                .tools
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
            uptime: self.start_time.elapsed(),
        }
    }
}

impl Default for CallMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics for a single tool.
#[derive(Debug, Clone, Default)]
pub struct ToolMetrics {
    pub invocations: u64,
    pub successes: u64,
    pub failures: u64,
    pub total_duration: Duration,
    pub min_duration: Duration,
    pub max_duration: Duration,
}

impl ToolMetrics {
    pub fn record(&mut self, duration: Duration, success: bool) {
        self.invocations += 1;
        if success {
            self.successes += 1;
        } else {
            self.failures += 1;
        }
        self.total_duration = self.total_duration.saturating_add(duration);
        self.min_duration = if self.invocations == 1 {
            duration
        } else {
            self.min_duration.min(duration)
        };
        self.max_duration = self.max_duration.max(duration);
    }

    pub fn avg_duration(&self) -> Duration {
        if self.invocations == 0 {
            return Duration::ZERO;
        }
        let nanos = self.total_duration.as_nanos() / u128::from(self.invocations);
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }
}

/// Point-in-time copy of a monitor's statistics.
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub tools: BTreeMap<String, ToolMetrics>,
    pub uptime: Duration,
}

impl MetricsSnapshot {
    pub fn total_calls(&self) -> u64 {
        self.tools.values().map(|m| m.invocations).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_metrics() {
        let mut metrics = ToolMetrics::default();
        metrics.record(Duration::from_millis(100), true);
        metrics.record(Duration::from_millis(200), true);
        metrics.record(Duration::from_millis(60), false);

        assert_eq!(metrics.invocations, 3);
        assert_eq!(metrics.successes, 2);
        assert_eq!(metrics.failures, 1);
        assert_eq!(metrics.min_duration, Duration::from_millis(60));
        assert_eq!(metrics.max_duration, Duration::from_millis(200));
        assert_eq!(metrics.avg_duration(), Duration::from_millis(120));
    }

    #[test]
    fn test_avg_duration_with_u32_wrapping_count() {
        let metrics = ToolMetrics {
            invocations: 1 << 32,
            total_duration: Duration::from_secs(1 << 32),
            ..Default::default()
        };
        assert_eq!(metrics.avg_duration(), Duration::from_secs(1));
    }

    #[test]
    fn test_avg_duration_empty() {
        assert_eq!(ToolMetrics::default().avg_duration(), Duration::ZERO);
    }

    #[test]
    fn test_call_metrics_snapshot() {
        let metrics = CallMetrics::new();
        metrics.record("add", Duration::from_millis(3), true);
        metrics.record("add", Duration::from_millis(5), false);
        metrics.record("search", Duration::from_millis(40), true);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.total_calls(), 3);
        assert_eq!(snapshot.tools["add"].invocations, 2);
        assert_eq!(snapshot.tools["add"].failures, 1);
        assert_eq!(snapshot.tools["search"].max_duration, Duration::from_millis(40));
    }
}
