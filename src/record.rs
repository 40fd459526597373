// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The telemetry record sent to the collector for every observed call.

use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Session name used when an automatically wrapped call carries no session.
pub const AUTO_SESSION_NAME: &str = "Auto Session";

/// Step recorded by automatic wrapping, which cannot know session order.
pub const AUTO_STEP: u64 = 0;

/// Outcome of an observed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    Success,
    Error,
}

impl CallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl std::fmt::Display for CallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observed tool invocation.
///
/// `response` is only populated on success and `error` only on failure; the
/// other is serialized as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    pub id: String,
    pub tool: String,
    pub params: Value,
    pub response: Option<Value>,
    pub error: Option<String>,
    pub status: CallStatus,
    /// Elapsed milliseconds.
    pub duration: u64,
    pub agent: String,
    pub session_id: String,
    pub session_name: String,
    pub step: u64,
    pub timestamp: String,
}

impl LogRecord {
    /// Start building a record for `tool` with a fresh id.
    pub fn builder(tool: impl Into<String>) -> LogRecordBuilder {
        LogRecordBuilder::new(tool)
    }
}

/// Builder for [`LogRecord`].
#[derive(Debug, Clone)]
pub struct LogRecordBuilder {
    id: String,
    tool: String,
    params: Value,
    outcome: Outcome,
    duration: Duration,
    agent: String,
    session_id: String,
    session_name: String,
    step: u64,
}

#[derive(Debug, Clone)]
enum Outcome {
    Success(Value),
    Error(String),
}

impl LogRecordBuilder {
    fn new(tool: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            tool: tool.into(),
            params: Value::Object(Default::default()),
            outcome: Outcome::Success(Value::Null),
            duration: Duration::ZERO,
            agent: crate::config::DEFAULT_AGENT.to_string(),
            session_id: String::new(),
            session_name: AUTO_SESSION_NAME.to_string(),
            step: AUTO_STEP,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn params(mut self, params: Value) -> Self {
        self.params = params;
        self
    }

    /// Mark the call successful with the given response payload.
    pub fn success(mut self, response: Value) -> Self {
        self.outcome = Outcome::Success(response);
        self
    }

    /// Mark the call failed with the given message.
    pub fn failure(mut self, message: impl Into<String>) -> Self {
        self.outcome = Outcome::Error(message.into());
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = agent.into();
        self
    }

    pub fn session(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.session_id = id.into();
        self.session_name = name.into();
        self
    }

    pub fn step(mut self, step: u64) -> Self {
        self.step = step;
        self
    }

    /// Finish the record, stamping the current time.
    pub fn build(self) -> LogRecord {
        let (status, response, error) = match self.outcome {
            Outcome::Success(value) => (CallStatus::Success, Some(value), None),
            Outcome::Error(message) => (CallStatus::Error, None, Some(message)),
        };

        LogRecord {
            id: self.id,
            tool: self.tool,
            params: self.params,
            response,
            error,
            status,
            duration: self.duration.as_millis() as u64,
            agent: self.agent,
            session_id: self.session_id,
            session_name: self.session_name,
            step: self.step,
            timestamp: now_timestamp(),
        }
    }
}

/// Generate a new record or session identifier.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current UTC time as ISO-8601 with millisecond precision.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_record_shape() {
        let record = LogRecord::builder("add")
            .params(json!({"a": 1, "b": 2}))
            .success(json!(3))
            .duration(Duration::from_millis(12))
            .agent("calc-agent")
            .session("s-1", "Auto Session")
            .build();

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["tool"], "add");
        assert_eq!(value["status"], "success");
        assert_eq!(value["response"], 3);
        assert_eq!(value["error"], Value::Null);
        assert_eq!(value["duration"], 12);
        assert_eq!(value["sessionId"], "s-1");
        assert_eq!(value["sessionName"], "Auto Session");
        assert_eq!(value["step"], 0);
        assert_eq!(value["agent"], "calc-agent");
    }

    #[test]
    fn test_error_record_shape() {
        let record = LogRecord::builder("explode").failure("boom").build();

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["error"], "boom");
        assert_eq!(value["response"], Value::Null);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = LogRecord::builder("t").build();
        let b = LogRecord::builder("t").build();
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn test_timestamp_is_iso8601() {
        let ts = now_timestamp();
        assert!(ts.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
        // 2026-01-01T00:00:00.000Z
        assert_eq!(ts.len(), 24);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(CallStatus::Success.to_string(), "success");
        assert_eq!(CallStatus::Error.to_string(), "error");
        assert!(!CallStatus::Error.is_success());
    }
}
