// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Error types for mcp-monitor.
//!
//! Only configuration problems and calls into operations that a disabled
//! monitor does not offer ever reach the caller. Reporting failures are
//! typed so that sinks can describe them, but the [`Reporter`] absorbs them.
//!
//! [`Reporter`]: crate::reporter::Reporter

use thiserror::Error;

/// Boxed error type carried through instrumented tool handlers.
///
/// Handlers return this and the interceptor hands the very same box back to
/// the caller, so downcasting works exactly as it would without monitoring.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by [`Monitor`](crate::Monitor) operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MonitorError {
    #[error("No API key provided; monitoring is disabled")]
    MissingApiKey,
}

/// Errors raised by the bundled [`ToolRegistry`](crate::tools::ToolRegistry) host.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid registration for {name}: {message}")]
    InvalidRegistration { name: String, message: String },

    #[error("Tool already registered: {0}")]
    Duplicate(String),
}

/// Errors that can occur while delivering a record to the collector.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Network error: {0}")]
    Http(String),

    #[error("Collector responded with status {0}")]
    Status(u16),
}

impl From<reqwest::Error> for ReportError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Invalid config format: {0}")]
    InvalidFormat(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("IO error reading config: {0}")]
    IoError(String),

    #[error("YAML parsing error: {0}")]
    YamlError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),
}

impl ConfigError {
    /// Create an invalid value error.
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(err.to_string()),
            _ => Self::IoError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::YamlError(err.to_string())
    }
}
