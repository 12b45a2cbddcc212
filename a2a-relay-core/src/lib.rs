//! # a2a-relay-core - Agent registry and A2A client
//!
//! `a2a-relay-core` lets a host talk to up to five remote agents over the
//! Agent2Agent (A2A) protocol.
//!
//! ## Highlights
//!
//! - **Registry**: validated name-to-agent mapping rebuilt from the host's
//!   `agent_<N>_<field>` credentials on every call.
//! - **Auth**: `Authorization` headers for bearer, api-key and basic agents.
//! - **A2A client**: `message/send`, `tasks/get`, and `message/stream` task
//!   submission that hangs up as soon as the task id is known.
//! - **Discovery**: agent card lookup with `agent-card.json` / `agent.json`
//!   fallback.
//! - **Tools**: five single-message host tools on top of the above.
//!
//! ## Architecture Overview
//!
//! - `registry`: slot evaluation and the [`AgentRegistry`].
//! - `auth`: header construction.
//! - `a2a/`: JSON-RPC envelope, SSE reader, client, discovery and errors.
//! - `tools/`: the operations layer and the [`AgentTool`] trait.

pub mod a2a;
pub mod auth;
pub mod registry;
pub mod tools;

pub use a2a::{A2aClient, A2aError, A2aResult, AgentCardSummary, ErrorCategory, Timeouts};
pub use auth::build_auth_headers;
pub use registry::{
    validate_credentials, AgentConfig, AgentListing, AgentRegistry, AuthType, RegistryError,
    RegistryResult,
};
pub use tools::{builtin_tools, find_tool, AgentTool, ToolContext, ToolMessage};
