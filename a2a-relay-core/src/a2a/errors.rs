//! A2A client error types
//!
//! The `Display` text of every [`A2aError`] is the message reported to the
//! host when an operation fails.

use std::error::Error as _;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

/// Error taxonomy shared by every operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Registry problems: empty registry, unknown agent, missing URL or secret
    Configuration,
    /// Connection failure, timeout, non-2xx status
    Transport,
    /// JSON-RPC `error` member present in a response or stream event
    Protocol,
    /// Body is not JSON
    Decode,
}

/// A2A client error
#[derive(Debug, Error)]
pub enum A2aError {
    #[error("Network Error: {0}")]
    Transport(String),

    #[error("Network Error: HTTP {status} for url: {url}")]
    HttpStatus { status: u16, url: String },

    /// The agent's `error` object, kept verbatim
    #[error("A2A Error: {0}")]
    Protocol(Value),

    #[error("Invalid JSON Response: {body}")]
    Decode {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Error: failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Error: No taskId received from agent")]
    NoTaskId,

    #[error("Failed to fetch Agent Card from both paths. Last error: {last_error}")]
    DiscoveryFailed { last_error: String },
}

impl A2aError {
    /// Transport error for a wait that exceeded `limit`.
    pub(crate) fn timed_out(what: &str, limit: Duration) -> Self {
        A2aError::Transport(format!("{what} timed out after {limit:?}"))
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            A2aError::Transport(_)
            | A2aError::HttpStatus { .. }
            | A2aError::DiscoveryFailed { .. } => ErrorCategory::Transport,
            A2aError::Protocol(_) | A2aError::NoTaskId => ErrorCategory::Protocol,
            A2aError::Decode { .. } | A2aError::Encode(_) => ErrorCategory::Decode,
        }
    }
}

impl From<reqwest::Error> for A2aError {
    fn from(err: reqwest::Error) -> Self {
        A2aError::Transport(describe_transport_error(&err))
    }
}

/// reqwest's top-level message hides the underlying cause (timeout, refused
/// connection, ...), so the source chain is appended.
pub(crate) fn describe_transport_error(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}

/// A2A Result type alias
pub type A2aResult<T> = Result<T, A2aError>;
