// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Monitor configuration.
//!
//! Options can come from several sources, merged with precedence
//! (overrides > environment > file > defaults):
//! - An explicit JSON or YAML file
//! - `MCP_MONITOR_*` environment variables
//! - Caller overrides, e.g. command-line flags

mod loader;
mod types;

pub use loader::{
    load_options_file, options_from_env, options_from_vars, ENV_AGENT, ENV_API_KEY, ENV_API_URL,
    ENV_BATCH_SIZE, ENV_DEBUG, ENV_ENABLED,
};
pub use types::{
    MonitorOptions, PartialOptions, DEFAULT_AGENT, DEFAULT_API_URL, DEFAULT_BATCH_SIZE,
};

use crate::error::ConfigError;
use std::path::Path;

/// Load and merge all configuration sources.
pub fn load_options(
    file: Option<&Path>,
    overrides: PartialOptions,
) -> Result<MonitorOptions, ConfigError> {
    let from_file = match file {
        Some(path) => load_options_file(path)?,
        None => PartialOptions::default(),
    };
    let from_env = options_from_env()?;

    Ok(from_file.overlay(from_env).overlay(overrides).resolve())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_options_overrides_win() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("monitor.json");
        std::fs::write(&path, r#"{"agent": "file-agent", "apiUrl": "http://file.test"}"#).unwrap();

        let overrides = PartialOptions {
            agent: Some("cli-agent".to_string()),
            ..Default::default()
        };

        let options = load_options(Some(&path), overrides).unwrap();
        assert_eq!(options.agent, "cli-agent");
        assert_eq!(options.logs_endpoint(), "http://file.test/api/logs");
    }
}
