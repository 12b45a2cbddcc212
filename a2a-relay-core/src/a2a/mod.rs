//! Agent2Agent (A2A) protocol client
//!
//! JSON-RPC 2.0 over HTTP for `message/send`, `message/stream` and
//! `tasks/get`, plus agent card discovery under `/.well-known/`.

pub mod client;
pub mod discovery;
pub mod errors;
pub mod rpc;
pub mod sse;
pub mod types;

pub use client::{scan_for_task_id, A2aClient, Timeouts};
pub use discovery::{fetch_agent_card, AgentCardSummary, AGENT_CARD_FILES};
pub use errors::{A2aError, A2aResult, ErrorCategory};
pub use rpc::{JsonRpcRequest, RpcOutcome};
pub use sse::{SseEvent, SseEventStream};
pub use types::{Message, MessageRole, Part};
