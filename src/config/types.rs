// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Configuration type definitions.
//!
//! [`PartialOptions`] is what a single source (file, environment, command
//! line) can contribute; [`MonitorOptions`] is the resolved, immutable
//! configuration a [`Monitor`](crate::Monitor) is built from.

use serde::{Deserialize, Serialize};

/// Default collector endpoint.
pub const DEFAULT_API_URL: &str = "https://mcp-monitor-production.up.railway.app";

/// Default agent label.
pub const DEFAULT_AGENT: &str = "default-agent";

/// Default (reserved) batch size.
pub const DEFAULT_BATCH_SIZE: usize = 1;

/// Options contributed by one configuration source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialOptions {
    /// Collector API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Collector base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Label identifying this deployment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,

    /// Whether records are sent at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Reserved; accepted and ignored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<usize>,

    /// Local diagnostic logging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
}

impl PartialOptions {
    /// Overlay `other` on top of `self`; fields set in `other` win.
    pub fn overlay(self, other: PartialOptions) -> PartialOptions {
        PartialOptions {
            api_key: other.api_key.or(self.api_key),
            api_url: other.api_url.or(self.api_url),
            agent: other.agent.or(self.agent),
            enabled: other.enabled.or(self.enabled),
            batch_size: other.batch_size.or(self.batch_size),
            debug: other.debug.or(self.debug),
        }
    }

    /// Resolve against the defaults.
    pub fn resolve(self) -> MonitorOptions {
        let defaults = MonitorOptions::default();
        MonitorOptions {
            api_key: self.api_key.filter(|key| !key.is_empty()),
            api_url: self.api_url.unwrap_or(defaults.api_url),
            agent: self.agent.unwrap_or(defaults.agent),
            enabled: self.enabled.unwrap_or(defaults.enabled),
            batch_size: self.batch_size.unwrap_or(defaults.batch_size),
            debug: self.debug.unwrap_or(defaults.debug),
        }
    }
}

/// Resolved monitor configuration.
///
/// A missing `api_key` puts the monitor into pass-through mode.
#[derive(Clone, PartialEq, Eq)]
pub struct MonitorOptions {
    pub api_key: Option<String>,
    pub api_url: String,
    pub agent: String,
    pub enabled: bool,
    pub batch_size: usize,
    pub debug: bool,
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            agent: DEFAULT_AGENT.to_string(),
            enabled: true,
            batch_size: DEFAULT_BATCH_SIZE,
            debug: false,
        }
    }
}

impl MonitorOptions {
    /// Create options with the given API key and defaults elsewhere.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::default().with_api_key(api_key)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let key = api_key.into();
        self.api_key = if key.is_empty() { None } else { Some(key) };
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = agent.into();
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Collector endpoint records are posted to.
    pub fn logs_endpoint(&self) -> String {
        format!("{}/api/logs", self.api_url.trim_end_matches('/'))
    }

    /// The configured API key, if it is non-empty.
    ///
    /// Fields are public, so an empty key can still arrive here; it counts as
    /// missing.
    pub fn active_api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }

    /// The API key with everything but the first four characters hidden.
    pub fn masked_api_key(&self) -> Option<String> {
        self.active_api_key().map(|key| {
            let visible: String = key.chars().take(4).collect();
            format!("{visible}****")
        })
    }
}

impl std::fmt::Debug for MonitorOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonitorOptions")
            .field("api_key", &self.masked_api_key())
            .field("api_url", &self.api_url)
            .field("agent", &self.agent)
            .field("enabled", &self.enabled)
            .field("batch_size", &self.batch_size)
            .field("debug", &self.debug)
            .finish()
    }
}
