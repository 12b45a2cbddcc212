//! Host-facing tool surface
//!
//! Every tool answers with exactly one text message. Failures are part of the
//! message, so `invoke` is infallible.

mod builtin;
pub mod operations;

use a2a_relay_config::{CredentialMap, RelayConfig};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::a2a::Timeouts;

pub use builtin::{
    CallAgentTool, GetAgentCapabilitiesTool, GetTaskStatusTool, ListAgentsTool, SubmitTaskTool,
};

/// The single text message produced by a tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolMessage {
    pub text: String,
}

impl ToolMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl std::fmt::Display for ToolMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// What a tool runs against: the raw credentials and the HTTP settings.
///
/// Tools never hold on to a built registry; it is rebuilt from
/// `credentials` on every invocation.
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub credentials: CredentialMap,
    pub http: Client,
    pub timeouts: Timeouts,
}

impl ToolContext {
    pub fn new(credentials: CredentialMap) -> Self {
        Self {
            credentials,
            http: Client::new(),
            timeouts: Timeouts::default(),
        }
    }

    pub fn from_config(config: &RelayConfig) -> Self {
        Self::new(config.credentials.clone()).with_timeouts(Timeouts::from(&config.http))
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }
}

#[async_trait]
pub trait AgentTool: Send + Sync {
    /// Stable tool name used for dispatch
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Run the tool with JSON parameters.
    async fn invoke(&self, ctx: &ToolContext, params: &Value) -> ToolMessage;
}

/// All tools in presentation order.
pub fn builtin_tools() -> Vec<Box<dyn AgentTool>> {
    vec![
        Box::new(ListAgentsTool),
        Box::new(CallAgentTool),
        Box::new(SubmitTaskTool),
        Box::new(GetTaskStatusTool),
        Box::new(GetAgentCapabilitiesTool),
    ]
}

pub fn find_tool(name: &str) -> Option<Box<dyn AgentTool>> {
    builtin_tools().into_iter().find(|tool| tool.name() == name)
}
