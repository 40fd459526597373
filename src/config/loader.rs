// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Configuration loading from files and the environment.

use std::path::Path;

use crate::error::ConfigError;

use super::types::PartialOptions;

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "MCP_MONITOR_API_KEY";
/// Environment variable holding the collector URL.
pub const ENV_API_URL: &str = "MCP_MONITOR_API_URL";
/// Environment variable holding the agent label.
pub const ENV_AGENT: &str = "MCP_MONITOR_AGENT";
/// Environment variable toggling reporting.
pub const ENV_ENABLED: &str = "MCP_MONITOR_ENABLED";
/// Environment variable toggling local diagnostics.
pub const ENV_DEBUG: &str = "MCP_MONITOR_DEBUG";
/// Environment variable holding the reserved batch size.
pub const ENV_BATCH_SIZE: &str = "MCP_MONITOR_BATCH_SIZE";

/// Load an options file (JSON or YAML, chosen by extension).
pub fn load_options_file(path: &Path) -> Result<PartialOptions, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&content).map_err(ConfigError::from),
        "json" => serde_json::from_str(&content).map_err(ConfigError::from),
        other => Err(ConfigError::InvalidFormat(format!(
            "unsupported config extension '{other}' for {}",
            path.display()
        ))),
    }
}

/// Read options from `MCP_MONITOR_*` environment variables.
pub fn options_from_env() -> Result<PartialOptions, ConfigError> {
    options_from_vars(|name| std::env::var(name).ok())
}

/// Read options through an arbitrary variable lookup.
///
/// Empty values are treated as unset.
pub fn options_from_vars<F>(lookup: F) -> Result<PartialOptions, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    let enabled = get(ENV_ENABLED)
        .map(|value| parse_bool(ENV_ENABLED, &value))
        .transpose()?;
    let debug = get(ENV_DEBUG)
        .map(|value| parse_bool(ENV_DEBUG, &value))
        .transpose()?;
    let batch_size = get(ENV_BATCH_SIZE)
        .map(|value| {
            value
                .trim()
                .parse::<usize>()
                .map_err(|e| ConfigError::invalid_value(ENV_BATCH_SIZE, e.to_string()))
        })
        .transpose()?;

    Ok(PartialOptions {
        api_key: get(ENV_API_KEY),
        api_url: get(ENV_API_URL),
        agent: get(ENV_AGENT),
        enabled,
        batch_size,
        debug,
    })
}

fn parse_bool(field: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::invalid_value(
            field,
            format!("expected a boolean, got '{other}'"),
        )),
    }
}
