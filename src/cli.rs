//! Command-line surface: argument parsing and dispatch to the host tools.

use std::path::PathBuf;

use a2a_relay_config::RelayConfig;
use a2a_relay_core::{builtin_tools, find_tool, validate_credentials, ToolContext};
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Debug, Parser)]
#[command(
    name = "a2a-relay",
    version,
    about = "Talk to remote A2A agents configured in a2a-relay.toml"
)]
pub struct Cli {
    /// Path to the configuration file (defaults to $A2A_RELAY_CONFIG, then ./a2a-relay.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check the configured agents and exit non-zero on the first problem
    Validate,

    /// List configured agents
    List,

    /// Send an instruction and wait for the reply
    Call { agent: String, instruction: String },

    /// Start a task and print its id
    Submit { agent: String, instruction: String },

    /// Show the state of a task
    Status { agent: String, task_id: String },

    /// Show an agent's card
    Capabilities { agent: String },

    /// List the available tools
    Tools,
}

impl Commands {
    /// Tool name and parameters for commands that map onto a tool.
    fn tool_call(&self) -> Option<(&'static str, Value)> {
        let call = match self {
            Commands::List => ("list_agents", json!({})),
            Commands::Call { agent, instruction } => (
                "call_agent",
                json!({"agent_name": agent, "instruction": instruction}),
            ),
            Commands::Submit { agent, instruction } => (
                "submit_task",
                json!({"agent_name": agent, "instruction": instruction}),
            ),
            Commands::Status { agent, task_id } => (
                "get_task_status",
                json!({"agent_name": agent, "task_id": task_id}),
            ),
            Commands::Capabilities { agent } => {
                ("get_agent_capabilities", json!({"agent_name": agent}))
            }
            Commands::Validate | Commands::Tools => return None,
        };
        Some(call)
    }
}

pub async fn run(command: &Commands, config: &RelayConfig) -> Result<()> {
    match command {
        Commands::Validate => {
            validate_credentials(&config.credentials)?;
            println!("Configuration is valid.");
            Ok(())
        }
        Commands::Tools => {
            for tool in builtin_tools() {
                println!("{}\t{}", tool.name(), tool.description());
            }
            Ok(())
        }
        other => {
            let (name, params) = other
                .tool_call()
                .ok_or_else(|| anyhow!("command {other:?} has no tool"))?;
            let tool = find_tool(name).ok_or_else(|| anyhow!("unknown tool '{name}'"))?;
            let ctx = ToolContext::from_config(config);

            tracing::debug!(tool = name, "Dispatching command");
            let message = tool.invoke(&ctx, &params).await;
            println!("{message}");
            Ok(())
        }
    }
}
