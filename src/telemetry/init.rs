// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Logging setup.

use std::io;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::MonitorOptions;

/// Configuration for the local log output.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Default log level if RUST_LOG is not set.
    pub default_level: Level,

    /// Whether to include target module path.
    pub include_target: bool,

    /// Whether to use ANSI colors in output.
    pub ansi_colors: bool,

    /// Write to stderr instead of stdout.
    pub stderr: bool,

    /// Custom filter directive (overrides default_level and RUST_LOG).
    pub filter_directive: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_level: Level::WARN,
            include_target: false,
            ansi_colors: true,
            stderr: true,
            filter_directive: None,
        }
    }
}

impl LogConfig {
    /// Verbose output, including the reporter's delivery diagnostics.
    pub fn debug() -> Self {
        Self {
            default_level: Level::DEBUG,
            include_target: true,
            filter_directive: Some("mcp_monitor=debug".to_string()),
            ..Self::default()
        }
    }

    /// Debug output when the resolved options ask for it, quiet otherwise.
    pub fn for_options(options: &MonitorOptions) -> Self {
        if options.debug {
            Self::debug()
        } else {
            Self::default()
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter_directive = Some(filter.into());
        self
    }

    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi_colors = ansi;
        self
    }
}

/// Returned by [`init_logging`]; keep it alive for the program's lifetime.
pub struct LogGuard {
    _private: (),
}

/// Install a global `tracing` subscriber.
///
/// Fails if a subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<LogGuard> {
    let fallback = || EnvFilter::new(config.default_level.to_string());
    let filter = match &config.filter_directive {
        Some(directive) => EnvFilter::try_new(directive).unwrap_or_else(|_| fallback()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback()),
    };

    let fmt_layer = fmt::layer()
        .with_ansi(config.ansi_colors)
        .with_target(config.include_target)
        .compact();

    let result = if config.stderr {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.with_writer(io::stderr))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
    };
    result.map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    Ok(LogGuard { _private: () })
}
