// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Instrumented tool handlers.

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, debug_span, Instrument};

use crate::record::{new_id, LogRecord, AUTO_SESSION_NAME, AUTO_STEP};
use crate::reporter::Reporter;
use crate::sanitize::{sanitize_params, sanitize_response};
use crate::telemetry::CallMetrics;
use crate::tools::{RequestContext, ToolFn};

/// Everything a wrapped handler needs to observe and report a call.
pub(crate) struct Instrumentation {
    /// `None` when the monitor has no API key.
    pub reporter: Option<Reporter>,
    pub agent: String,
    pub debug: bool,
    pub metrics: Arc<CallMetrics>,
}

impl Instrumentation {
    fn reporting(&self) -> Option<&Reporter> {
        self.reporter.as_ref().filter(|reporter| reporter.is_enabled())
    }
}

/// Wrap `handler` so every call of `tool` is measured and reported.
///
/// The returned handler calls the original with the original arguments and
/// hands back its result or error untouched. The record is delivered in the
/// background and never awaited.
pub(crate) fn instrument(
    instrumentation: Arc<Instrumentation>,
    tool: &str,
    handler: ToolFn,
) -> ToolFn {
    let tool: Arc<str> = Arc::from(tool);

    ToolFn::new(move |params: Value, ctx: RequestContext| {
        let instrumentation = Arc::clone(&instrumentation);
        let handler = handler.clone();
        let tool = Arc::clone(&tool);

        async move {
            let id = new_id();
            let start = Instant::now();
            let (session_id, session_name) = session_identity(&params, &ctx);
            let sanitized_params = instrumentation
                .reporting()
                .map(|_| sanitize_params(Some(&params)));

            let span = debug_span!(
                "tool_call",
                tool = %tool,
                session = %session_name,
                request = ctx.request_id.as_deref().unwrap_or("-")
            );
            let outcome = handler.call(params, ctx).instrument(span).await;
            let duration = start.elapsed();

            instrumentation
                .metrics
                .record(&tool, duration, outcome.is_ok());

            if let (Some(reporter), Some(params)) = (instrumentation.reporting(), sanitized_params)
            {
                let builder = LogRecord::builder(tool.as_ref())
                    .id(id)
                    .params(params)
                    .duration(duration)
                    .agent(instrumentation.agent.as_str())
                    .session(session_id, session_name)
                    .step(AUTO_STEP);
                let record = match &outcome {
                    Ok(value) => builder.success(sanitize_response(Some(value))),
                    Err(err) => builder.failure(err.to_string()),
                }
                .build();

                reporter.detach(record);
            } else if instrumentation.debug {
                debug!(tool = %tool, "Reporting inactive; call not sent");
            }

            outcome
        }
    })
}

/// Session id and name for an automatically wrapped call.
///
/// The host's request context wins, then `sessionId`/`sessionName` string
/// fields in the params; otherwise a fresh id and the auto-session label.
pub(crate) fn session_identity(params: &Value, ctx: &RequestContext) -> (String, String) {
    let from_params = |key: &str| {
        params
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let session_id = ctx
        .session_id
        .clone()
        .filter(|s| !s.is_empty())
        .or_else(|| from_params("sessionId"))
        .unwrap_or_else(new_id);
    let session_name = ctx
        .session_name
        .clone()
        .filter(|s| !s.is_empty())
        .or_else(|| from_params("sessionName"))
        .unwrap_or_else(|| AUTO_SESSION_NAME.to_string());

    (session_id, session_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_session_from_context() {
        let ctx = RequestContext::new().with_session("ctx-id", "Ctx Session");
        let params = json!({"sessionId": "param-id", "sessionName": "Param Session"});
        assert_eq!(
            session_identity(&params, &ctx),
            ("ctx-id".to_string(), "Ctx Session".to_string())
        );
    }

    #[test]
    fn test_session_from_params() {
        let params = json!({"sessionId": "param-id", "sessionName": "Param Session"});
        assert_eq!(
            session_identity(&params, &RequestContext::new()),
            ("param-id".to_string(), "Param Session".to_string())
        );
    }

    #[test]
    fn test_session_fields_resolve_independently() {
        let ctx = RequestContext {
            session_name: Some("Named".to_string()),
            ..Default::default()
        };
        let params = json!({"sessionId": "param-id"});
        assert_eq!(
            session_identity(&params, &ctx),
            ("param-id".to_string(), "Named".to_string())
        );
    }

    #[test]
    fn test_session_fallback() {
        let (id, name) = session_identity(&json!({"sessionId": 42}), &RequestContext::new());
        assert!(uuid::Uuid::parse_str(&id).is_ok());
        assert_eq!(name, AUTO_SESSION_NAME);

        let (other, _) = session_identity(&Value::Null, &RequestContext::new());
        assert_ne!(id, other);
    }
}
