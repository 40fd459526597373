// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! A minimal in-process tool host.
//!
//! [`ToolRegistry`] accepts registrations in both call shapes, stores the
//! handlers by name and dispatches calls to them. It is what the CLI and the
//! tests use as a host; real deployments wrap their own framework's
//! registrar instead.

use std::collections::HashMap;

use serde_json::Value;

use super::{RequestContext, ToolArg, ToolFn, ToolRegistrar, ToolResult};
use crate::error::ToolError;

/// A tool as stored by the registry.
#[derive(Debug, Clone)]
pub struct RegisteredTool {
    pub name: String,
    pub description: Option<String>,
    pub schema: Value,
    pub handler: ToolFn,
}

/// Registry of tools, maps names to handlers.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, RegisteredTool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Registered tool names, sorted.
    pub fn tool_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Invoke a registered tool.
    pub async fn call(&self, name: &str, params: Value, ctx: RequestContext) -> ToolResult {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;
        tool.handler.call(params, ctx).await
    }

    fn parse(name: &str, args: Vec<ToolArg>) -> Result<RegisteredTool, ToolError> {
        let invalid = |message: String| ToolError::InvalidRegistration {
            name: name.to_string(),
            message,
        };

        let count = args.len();
        let mut args = args.into_iter();
        let (description, schema, handler) = match (count, args.next(), args.next(), args.next()) {
            (2, Some(ToolArg::Value(schema)), Some(ToolArg::Handler(handler)), None) => {
                (None, schema, handler)
            }
            (
                3,
                Some(ToolArg::Value(Value::String(description))),
                Some(ToolArg::Value(schema)),
                Some(ToolArg::Handler(handler)),
            ) => (Some(description), schema, handler),
            (2 | 3, ..) => {
                return Err(invalid(
                    "expected ([description,] schema, handler)".to_string(),
                ))
            }
            (n, ..) => return Err(invalid(format!("expected 2 or 3 arguments, got {n}"))),
        };

        Ok(RegisteredTool {
            name: name.to_string(),
            description,
            schema,
            handler,
        })
    }
}

impl ToolRegistrar for ToolRegistry {
    type Output = Result<(), ToolError>;

    fn tool(&mut self, name: &str, args: Vec<ToolArg>) -> Self::Output {
        if self.contains(name) {
            return Err(ToolError::Duplicate(name.to_string()));
        }
        let tool = Self::parse(name, args)?;
        self.tools.insert(name.to_string(), tool);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn echo() -> ToolFn {
        ToolFn::new(|params, _ctx| async move { Ok(params) })
    }

    #[test]
    fn test_register_schema_and_handler() {
        let mut registry = ToolRegistry::new();
        registry
            .tool("echo", vec![json!({}).into(), echo().into()])
            .unwrap();

        let tool = registry.get("echo").unwrap();
        assert!(tool.description.is_none());
        assert_eq!(tool.schema, json!({}));
    }

    #[test]
    fn test_register_with_description() {
        let mut registry = ToolRegistry::new();
        registry
            .tool(
                "echo",
                vec!["Echoes params".into(), json!({"type": "object"}).into(), echo().into()],
            )
            .unwrap();

        let tool = registry.get("echo").unwrap();
        assert_eq!(tool.description.as_deref(), Some("Echoes params"));
    }

    #[test]
    fn test_register_bad_arity() {
        let mut registry = ToolRegistry::new();
        let result = registry.tool("echo", vec![echo().into()]);
        assert!(matches!(result, Err(ToolError::InvalidRegistration { .. })));
        assert!(!registry.contains("echo"));
    }

    #[test]
    fn test_register_missing_handler() {
        let mut registry = ToolRegistry::new();
        let result = registry.tool("echo", vec![json!({}).into(), json!({}).into()]);
        assert!(matches!(result, Err(ToolError::InvalidRegistration { .. })));
    }

    #[test]
    fn test_register_duplicate() {
        let mut registry = ToolRegistry::new();
        registry
            .tool("echo", vec![json!({}).into(), echo().into()])
            .unwrap();
        let result = registry.tool("echo", vec![json!({}).into(), echo().into()]);
        assert_eq!(result, Err(ToolError::Duplicate("echo".to_string())));
    }

    #[tokio::test]
    async fn test_call() {
        let mut registry = ToolRegistry::new();
        registry
            .tool("echo", vec![json!({}).into(), echo().into()])
            .unwrap();

        let result = registry
            .call("echo", json!({"x": 1}), RequestContext::new())
            .await
            .unwrap();
        assert_eq!(result, json!({"x": 1}));
        assert_eq!(registry.tool_names(), vec!["echo"]);
    }

    #[tokio::test]
    async fn test_call_not_found() {
        let registry = ToolRegistry::new();
        let err = registry
            .call("missing", json!({}), RequestContext::new())
            .await
            .unwrap_err();
        let err = err.downcast::<ToolError>().unwrap();
        assert_eq!(*err, ToolError::NotFound("missing".to_string()));
    }
}
