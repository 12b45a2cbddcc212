//! The five relay operations.
//!
//! Each operation rebuilds the registry from the context's credentials, runs
//! against one agent and collapses every outcome, failures included, into a
//! single text message.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::a2a::{A2aClient, A2aError};
use crate::registry::{AgentConfig, AgentRegistry, RegistryError};

use super::ToolContext;

pub const REGISTRY_NOT_CONFIGURED: &str = "Agents Registry is not configured.";
pub const NO_AGENTS_CONFIGURED: &str = "No agents configured in registry.";
pub const SUCCESS: &str = "Success";

/// Registry lookup failure, already rendered as the operation's message
type Rejection = String;

fn registry_rejection(err: &RegistryError, empty_message: &str) -> Rejection {
    debug!(category = ?err.category(), error = %err, "Registry unavailable");
    match err {
        RegistryError::EmptyRegistry => empty_message.to_string(),
        other => format!("Configuration Error: {other}"),
    }
}

fn resolve_agent(
    ctx: &ToolContext,
    agent_name: Option<&str>,
) -> Result<AgentConfig, Rejection> {
    let registry = AgentRegistry::build(&ctx.credentials)
        .map_err(|err| registry_rejection(&err, REGISTRY_NOT_CONFIGURED))?;

    agent_name
        .and_then(|name| registry.get(name))
        .cloned()
        .ok_or_else(|| {
            format!(
                "Agent '{}' not found in registry.",
                agent_name.unwrap_or("None")
            )
        })
}

fn client_for(ctx: &ToolContext, agent: &AgentConfig) -> A2aClient {
    A2aClient::for_agent(ctx.http.clone(), agent).with_timeouts(ctx.timeouts)
}

fn render_error(err: &A2aError) -> String {
    debug!(category = ?err.category(), "A2A operation failed");
    err.to_string()
}

fn render_pretty<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|err| format!("Error: {err}"))
}

fn present(result: Option<Value>) -> Option<Value> {
    result.filter(|value| !value.is_null())
}

/// Configured agents as a pretty JSON array, in slot order.
pub fn list_agents(ctx: &ToolContext) -> String {
    match AgentRegistry::build(&ctx.credentials) {
        Ok(registry) => {
            info!(agents = registry.len(), "Listing agents");
            render_pretty(&registry.listing())
        }
        Err(err) => registry_rejection(&err, NO_AGENTS_CONFIGURED),
    }
}

/// `message/send`: compact JSON of the result, or `Success` when there is none.
pub async fn call_agent(ctx: &ToolContext, agent_name: Option<&str>, instruction: &str) -> String {
    let agent = match resolve_agent(ctx, agent_name) {
        Ok(agent) => agent,
        Err(message) => return message,
    };
    info!(agent = agent_name.unwrap_or_default(), "Calling agent");

    match client_for(ctx, &agent).send_message(instruction).await {
        Ok(result) => present(result)
            .map(|value| value.to_string())
            .unwrap_or_else(|| SUCCESS.to_string()),
        Err(err) => render_error(&err),
    }
}

/// `message/stream`: the bare task identifier.
pub async fn submit_task(ctx: &ToolContext, agent_name: Option<&str>, instruction: &str) -> String {
    let agent = match resolve_agent(ctx, agent_name) {
        Ok(agent) => agent,
        Err(message) => return message,
    };
    info!(agent = agent_name.unwrap_or_default(), "Submitting task");

    match client_for(ctx, &agent).submit_task(instruction).await {
        Ok(task_id) => task_id,
        Err(err) => render_error(&err),
    }
}

/// `tasks/get`: pretty JSON of the result, or `Success` when there is none.
pub async fn get_task_status(
    ctx: &ToolContext,
    agent_name: Option<&str>,
    task_id: &str,
) -> String {
    let agent = match resolve_agent(ctx, agent_name) {
        Ok(agent) => agent,
        Err(message) => return message,
    };
    info!(agent = agent_name.unwrap_or_default(), %task_id, "Querying task status");

    match client_for(ctx, &agent).get_task(task_id).await {
        Ok(result) => present(result)
            .map(|value| render_pretty(&value))
            .unwrap_or_else(|| SUCCESS.to_string()),
        Err(err) => render_error(&err),
    }
}

/// Agent card summary as pretty JSON.
pub async fn get_agent_capabilities(ctx: &ToolContext, agent_name: Option<&str>) -> String {
    let agent = match resolve_agent(ctx, agent_name) {
        Ok(agent) => agent,
        Err(message) => return message,
    };
    info!(agent = agent_name.unwrap_or_default(), "Fetching agent card");

    match client_for(ctx, &agent).agent_card().await {
        Ok(summary) => render_pretty(&summary),
        Err(err) => render_error(&err),
    }
}
