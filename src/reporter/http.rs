// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! HTTP delivery to the collector's `/api/logs` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::LogSink;
use crate::config::MonitorOptions;
use crate::error::ReportError;
use crate::record::LogRecord;

/// Header carrying the collector API key.
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Request timeout for a single delivery.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Posts records as JSON to the collector.
pub struct HttpSink {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpSink {
    /// Create a sink posting to `endpoint` with the given key.
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "Falling back to default HTTP client");
                Client::new()
            });

        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    /// Create a sink from resolved options. Returns `None` without an API key.
    pub fn from_options(options: &MonitorOptions) -> Option<Self> {
        options
            .active_api_key()
            .map(|key| Self::new(options.logs_endpoint(), key))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LogSink for HttpSink {
    async fn deliver(&self, record: &LogRecord) -> Result<(), ReportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(record)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReportError::Status(status.as_u16()));
        }
        Ok(())
    }
}
