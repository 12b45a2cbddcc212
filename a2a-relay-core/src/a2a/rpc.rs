//! JSON-RPC 2.0 envelope for the A2A methods this client speaks

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::errors::{A2aError, A2aResult};
use super::types::{Message, MessageSendParams, TaskQueryParams};

/// Send a message and wait for the result
pub const METHOD_MESSAGE_SEND: &str = "message/send";

/// Send a message and subscribe to updates via SSE
pub const METHOD_MESSAGE_STREAM: &str = "message/stream";

/// Retrieve the current state of a task
pub const METHOD_TASKS_GET: &str = "tasks/get";

pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 request. Every request gets a fresh id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: Value,
    pub id: String,
}

impl JsonRpcRequest {
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            id: Uuid::new_v4().to_string(),
        }
    }

    /// `message/send` carrying `instruction` as a single user text part
    pub fn message_send(instruction: &str) -> A2aResult<Self> {
        Self::with_message(METHOD_MESSAGE_SEND, instruction)
    }

    /// `message/stream` carrying `instruction` as a single user text part
    pub fn message_stream(instruction: &str) -> A2aResult<Self> {
        Self::with_message(METHOD_MESSAGE_STREAM, instruction)
    }

    pub fn tasks_get(task_id: impl Into<String>) -> A2aResult<Self> {
        let params = serde_json::to_value(TaskQueryParams { id: task_id.into() })
            .map_err(A2aError::Encode)?;
        Ok(Self::new(METHOD_TASKS_GET, params))
    }

    fn with_message(method: &str, instruction: &str) -> A2aResult<Self> {
        let params = MessageSendParams {
            message: Message::user_text(instruction),
        };
        let params = serde_json::to_value(params).map_err(A2aError::Encode)?;
        Ok(Self::new(method, params))
    }
}

/// Interpretation of a JSON-RPC response body or stream fragment.
///
/// A non-null `error` member always wins and `result` is then never looked at.
#[derive(Debug, Clone, PartialEq)]
pub enum RpcOutcome {
    Error(Value),
    /// `None` when the body has no `result` member
    Result(Option<Value>),
}

impl RpcOutcome {
    pub fn from_body(body: &Value) -> Self {
        if let Some(error) = body.get("error").filter(|e| !e.is_null()) {
            return RpcOutcome::Error(error.clone());
        }
        RpcOutcome::Result(body.get("result").cloned())
    }
}

/// Task handle carried by a result, checking `taskId` then `task_id`. The
/// first non-empty string wins.
pub fn task_id_from_result(result: &Value) -> Option<&str> {
    ["taskId", "task_id"]
        .iter()
        .filter_map(|key| result.get(*key).and_then(Value::as_str))
        .find(|id| !id.is_empty())
}
