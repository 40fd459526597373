// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Payload bounding for outbound records.
//!
//! Payloads are measured by their compact JSON serialization. Anything above
//! the limit is replaced by a small marker carrying the full size and a
//! preview, so a single huge argument cannot blow up a record.

use serde::Serialize;
use serde_json::{json, Value};

/// Serialized length above which params are truncated.
pub const PARAMS_MAX_CHARS: usize = 5_000;

/// Serialized length above which responses are truncated.
pub const RESPONSE_MAX_CHARS: usize = 10_000;

/// Length of the preview kept for truncated payloads.
pub const PREVIEW_CHARS: usize = 500;

/// Bound a params payload. Absent or null params become `{}`.
pub fn sanitize_params<T>(params: Option<&T>) -> Value
where
    T: Serialize + ?Sized,
{
    match params.map(serialize) {
        None | Some(Ok(Value::Null)) => Value::Object(Default::default()),
        Some(Ok(value)) => bound(value, PARAMS_MAX_CHARS),
        Some(Err(())) => serialize_failure(),
    }
}

/// Bound a response payload. Absent or null responses stay null.
pub fn sanitize_response<T>(response: Option<&T>) -> Value
where
    T: Serialize + ?Sized,
{
    match response.map(serialize) {
        None | Some(Ok(Value::Null)) => Value::Null,
        Some(Ok(value)) => bound(value, RESPONSE_MAX_CHARS),
        Some(Err(())) => serialize_failure(),
    }
}

/// Convert a payload without any size bound.
///
/// Only the serialization-failure marker applies.
pub fn to_payload<T>(value: &T) -> Value
where
    T: Serialize + ?Sized,
{
    serialize(value).unwrap_or_else(|()| serialize_failure())
}

/// Replace `value` with a truncation marker if its JSON is over `limit`.
pub fn bound(value: Value, limit: usize) -> Value {
    let serialized = value.to_string();
    let size = serialized.chars().count();
    if size <= limit {
        return value;
    }

    let preview: String = serialized.chars().take(PREVIEW_CHARS).collect();
    json!({
        "truncated": true,
        "size": size,
        "preview": preview,
    })
}

fn serialize<T>(value: &T) -> Result<Value, ()>
where
    T: Serialize + ?Sized,
{
    serde_json::to_value(value).map_err(|err| {
        tracing::trace!(error = %err, "Payload could not be serialized");
    })
}

fn serialize_failure() -> Value {
    json!({ "error": "could not serialize" })
}
