// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! mcp-monitor command line: inspect configuration and send test records.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::Value;

use mcp_monitor::config::{self, PartialOptions};
use mcp_monitor::telemetry::{init_logging, LogConfig};
use mcp_monitor::{LogRecord, Monitor, MonitorOptions};

/// mcp-monitor - call-level telemetry for MCP tools.
#[derive(Parser)]
#[command(name = "mcp-monitor")]
#[command(author, version, about = "Call-level telemetry for MCP tools", long_about = None)]
struct Cli {
    /// Collector API key
    #[arg(long, env = "MCP_MONITOR_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Collector base URL
    #[arg(long)]
    api_url: Option<String>,

    /// Agent label attached to records
    #[arg(long)]
    agent: Option<String>,

    /// Options file (JSON or YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Show delivery diagnostics
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved configuration
    Config,

    /// Send a single record to the collector
    Send {
        /// Tool name
        #[arg(short, long)]
        tool: String,

        /// Params as JSON
        #[arg(short, long, default_value = "{}")]
        params: String,

        /// Response as JSON (ignored with --error)
        #[arg(short, long)]
        response: Option<String>,

        /// Record a failure with this message
        #[arg(short, long)]
        error: Option<String>,

        /// Session name
        #[arg(long)]
        session_name: Option<String>,

        /// Duration in milliseconds
        #[arg(long, default_value_t = 0)]
        duration_ms: u64,
    },
}

impl Cli {
    fn overrides(&self) -> PartialOptions {
        PartialOptions {
            api_key: self.api_key.clone(),
            api_url: self.api_url.clone(),
            agent: self.agent.clone(),
            debug: self.debug.then_some(true),
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = config::load_options(cli.config.as_deref(), cli.overrides())
        .context("failed to load configuration")?;

    // --debug is folded into the overrides, so this covers env and file too.
    let _guard = init_logging(&LogConfig::for_options(&options))?;

    match &cli.command {
        Commands::Config => print_config(&options),
        Commands::Send {
            tool,
            params,
            response,
            error,
            session_name,
            duration_ms,
        } => {
            let params = parse_json("params", params)?;
            let mut builder = LogRecord::builder(tool.as_str())
                .params(params)
                .agent(options.agent.as_str())
                .duration(Duration::from_millis(*duration_ms))
                .session(
                    mcp_monitor::record::new_id(),
                    session_name.as_deref().unwrap_or("CLI"),
                );
            builder = match (error, response) {
                (Some(message), _) => builder.failure(message.as_str()),
                (None, Some(response)) => builder.success(parse_json("response", response)?),
                (None, None) => builder.success(Value::Null),
            };
            let record = builder.build();

            let monitor = Monitor::new(options);
            monitor.send_log(&record).await?;
            println!(
                "{} {} [{}] to {}",
                "Submitted".green(),
                record.tool.bold(),
                record.status,
                monitor.options().logs_endpoint()
            );
            if !monitor.options().enabled {
                println!("{}", "Reporting is disabled; nothing was sent.".yellow());
            }
        }
    }

    Ok(())
}

fn parse_json(field: &str, raw: &str) -> anyhow::Result<Value> {
    serde_json::from_str(raw).with_context(|| format!("--{field} is not valid JSON"))
}

fn print_config(options: &MonitorOptions) {
    let key = options
        .masked_api_key()
        .unwrap_or_else(|| "(none - monitoring disabled)".to_string());

    println!("{}", "mcp-monitor configuration".bold());
    println!("  {:<10} {}", "api key:", key);
    println!("  {:<10} {}", "endpoint:", options.logs_endpoint());
    println!("  {:<10} {}", "agent:", options.agent);
    println!("  {:<10} {}", "enabled:", options.enabled);
    println!("  {:<10} {}", "debug:", options.debug);
    println!("  {:<10} {} (reserved)", "batch:", options.batch_size);
}
