use async_trait::async_trait;
use serde_json::Value;

use super::operations;
use super::{AgentTool, ToolContext, ToolMessage};

const AGENT_NAME: &str = "agent_name";
const INSTRUCTION: &str = "instruction";
const TASK_ID: &str = "task_id";

fn string_param<'a>(params: &'a Value, key: &str) -> Option<&'a str> {
    params.get(key).and_then(Value::as_str)
}

fn required_param<'a>(params: &'a Value, key: &str) -> Result<&'a str, ToolMessage> {
    string_param(params, key)
        .ok_or_else(|| ToolMessage::text(format!("Missing required parameter: {key}")))
}

pub struct ListAgentsTool;

#[async_trait]
impl AgentTool for ListAgentsTool {
    fn name(&self) -> &'static str {
        "list_agents"
    }

    fn description(&self) -> &'static str {
        "List every configured agent with its URL, auth type and description"
    }

    async fn invoke(&self, ctx: &ToolContext, _params: &Value) -> ToolMessage {
        ToolMessage::text(operations::list_agents(ctx))
    }
}

pub struct CallAgentTool;

#[async_trait]
impl AgentTool for CallAgentTool {
    fn name(&self) -> &'static str {
        "call_agent"
    }

    fn description(&self) -> &'static str {
        "Send an instruction to an agent and wait for its reply (message/send)"
    }

    async fn invoke(&self, ctx: &ToolContext, params: &Value) -> ToolMessage {
        let instruction = match required_param(params, INSTRUCTION) {
            Ok(instruction) => instruction,
            Err(message) => return message,
        };
        let agent_name = string_param(params, AGENT_NAME);
        ToolMessage::text(operations::call_agent(ctx, agent_name, instruction).await)
    }
}

pub struct SubmitTaskTool;

#[async_trait]
impl AgentTool for SubmitTaskTool {
    fn name(&self) -> &'static str {
        "submit_task"
    }

    fn description(&self) -> &'static str {
        "Start a long-running task on an agent and return its task id (message/stream)"
    }

    async fn invoke(&self, ctx: &ToolContext, params: &Value) -> ToolMessage {
        let instruction = match required_param(params, INSTRUCTION) {
            Ok(instruction) => instruction,
            Err(message) => return message,
        };
        let agent_name = string_param(params, AGENT_NAME);
        ToolMessage::text(operations::submit_task(ctx, agent_name, instruction).await)
    }
}

pub struct GetTaskStatusTool;

#[async_trait]
impl AgentTool for GetTaskStatusTool {
    fn name(&self) -> &'static str {
        "get_task_status"
    }

    fn description(&self) -> &'static str {
        "Look up the state of a previously submitted task (tasks/get)"
    }

    async fn invoke(&self, ctx: &ToolContext, params: &Value) -> ToolMessage {
        let task_id = match required_param(params, TASK_ID) {
            Ok(task_id) => task_id,
            Err(message) => return message,
        };
        let agent_name = string_param(params, AGENT_NAME);
        ToolMessage::text(operations::get_task_status(ctx, agent_name, task_id).await)
    }
}

pub struct GetAgentCapabilitiesTool;

#[async_trait]
impl AgentTool for GetAgentCapabilitiesTool {
    fn name(&self) -> &'static str {
        "get_agent_capabilities"
    }

    fn description(&self) -> &'static str {
        "Fetch an agent's card from its well-known discovery path"
    }

    async fn invoke(&self, ctx: &ToolContext, params: &Value) -> ToolMessage {
        let agent_name = string_param(params, AGENT_NAME);
        ToolMessage::text(operations::get_agent_capabilities(ctx, agent_name).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use a2a_relay_config::CredentialMap;
    use serde_json::json;

    fn context() -> ToolContext {
        let mut credentials = CredentialMap::new();
        credentials.insert("agent_1_name".into(), "echo".into());
        credentials.insert("agent_1_url".into(), "http://127.0.0.1:9".into());
        ToolContext::new(credentials)
    }

    #[tokio::test]
    async fn test_missing_instruction() {
        let message = CallAgentTool.invoke(&context(), &json!({"agent_name": "echo"})).await;
        assert_eq!(message.text, "Missing required parameter: instruction");
    }

    #[tokio::test]
    async fn test_missing_task_id() {
        let message = GetTaskStatusTool.invoke(&context(), &json!({"agent_name": "echo"})).await;
        assert_eq!(message.text, "Missing required parameter: task_id");
    }

    #[tokio::test]
    async fn test_missing_agent_name() {
        let message = GetAgentCapabilitiesTool.invoke(&context(), &json!({})).await;
        assert_eq!(message.text, "Agent 'None' not found in registry.");
    }

    #[tokio::test]
    async fn test_list_agents_ignores_params() {
        let message = ListAgentsTool.invoke(&context(), &json!({"unused": 1})).await;
        assert!(message.text.contains("\"name\": \"echo\""));
        assert!(message.text.contains("\"has_credentials\": false"));
    }
}
