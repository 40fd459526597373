// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The host side of tool registration.
//!
//! A host framework registers tools through [`ToolRegistrar::tool`], passing
//! the tool name and a loosely shaped argument list: either
//! `(schema, handler)` or `(description, schema, handler)`. Handlers are
//! [`ToolFn`]s: async functions from JSON params and a [`RequestContext`] to
//! a JSON result or a [`BoxError`].
//!
//! [`ToolRegistry`] is a small in-process host implementing this contract.
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_monitor::tools::{ToolArg, ToolFn, ToolRegistrar, ToolRegistry};
//! use serde_json::json;
//!
//! let mut registry = ToolRegistry::new();
//! registry.tool(
//!     "add",
//!     vec![
//!         ToolArg::from(json!({"a": "number", "b": "number"})),
//!         ToolArg::from(ToolFn::new(|params, _ctx| async move {
//!             let sum = params["a"].as_i64().unwrap_or(0) + params["b"].as_i64().unwrap_or(0);
//!             Ok(json!(sum))
//!         })),
//!     ],
//! )?;
//! ```

pub mod registry;

pub use registry::{RegisteredTool, ToolRegistry};

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;

pub use crate::error::BoxError;

/// Result of a tool invocation.
pub type ToolResult = Result<Value, BoxError>;

/// Boxed future returned by a [`ToolFn`].
pub type ToolFuture = Pin<Box<dyn Future<Output = ToolResult> + Send + 'static>>;

/// Per-invocation context supplied by the host framework.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Host-level session the call belongs to, if known.
    pub session_id: Option<String>,
    /// Human-readable name of that session.
    pub session_name: Option<String>,
    /// Host request identifier.
    pub request_id: Option<String>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.session_id = Some(id.into());
        self.session_name = Some(name.into());
        self
    }

    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }
}

/// A shareable async tool handler.
#[derive(Clone)]
pub struct ToolFn(Arc<dyn Fn(Value, RequestContext) -> ToolFuture + Send + Sync>);

impl ToolFn {
    /// Wrap an async closure as a handler.
    pub fn new<F, Fut>(handler: F) -> Self
    where
        F: Fn(Value, RequestContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ToolResult> + Send + 'static,
    {
        Self(Arc::new(
            move |params: Value, ctx: RequestContext| -> ToolFuture {
                Box::pin(handler(params, ctx))
            },
        ))
    }

    /// Invoke the handler.
    pub fn call(&self, params: Value, ctx: RequestContext) -> ToolFuture {
        (self.0)(params, ctx)
    }

    /// Whether two handles refer to the same handler.
    pub fn ptr_eq(&self, other: &ToolFn) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for ToolFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ToolFn(..)")
    }
}

/// One positional argument of a registration call.
#[derive(Debug, Clone)]
pub enum ToolArg {
    /// A description, schema, or any other plain value.
    Value(Value),
    /// The tool's handler.
    Handler(ToolFn),
}

impl ToolArg {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Handler(_) => None,
        }
    }

    pub fn as_handler(&self) -> Option<&ToolFn> {
        match self {
            Self::Handler(handler) => Some(handler),
            Self::Value(_) => None,
        }
    }
}

impl From<Value> for ToolArg {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for ToolArg {
    fn from(value: &str) -> Self {
        Self::Value(Value::String(value.to_string()))
    }
}

impl From<ToolFn> for ToolArg {
    fn from(handler: ToolFn) -> Self {
        Self::Handler(handler)
    }
}

/// A host object tools can be registered on.
pub trait ToolRegistrar {
    /// Whatever the host returns from a registration call.
    type Output;

    /// Register `name` with the given positional arguments.
    fn tool(&mut self, name: &str, args: Vec<ToolArg>) -> Self::Output;

    /// Whether this host actually exposes tool registration.
    ///
    /// Hosts that only sometimes support tools return `false` so that
    /// monitoring is skipped instead of installed on a dead entry point.
    fn accepts_tools(&self) -> bool {
        true
    }
}
