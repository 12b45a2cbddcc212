//! A2A client for a single registered agent.
//! Provides message send, streaming task submission, task lookup and discovery.

use std::time::Duration;

use a2a_relay_config::HttpConfig;
use bytes::Bytes;
use futures::Stream;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde_json::Value;
use tokio::time;
use tracing::{debug, warn};

use crate::a2a::discovery::{fetch_agent_card, AgentCardSummary};
use crate::a2a::errors::{A2aError, A2aResult};
use crate::a2a::rpc::{task_id_from_result, JsonRpcRequest, RpcOutcome};
use crate::a2a::sse::{BodyStream, SseEventStream};
use crate::auth::headers_for;
use crate::registry::AgentConfig;

/// Per-call time limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// `message/send`, `message/stream` and `tasks/get`
    pub request: Duration,
    /// Each agent card candidate
    pub discovery: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self::from(&HttpConfig::default())
    }
}

impl From<&HttpConfig> for Timeouts {
    fn from(config: &HttpConfig) -> Self {
        Self {
            request: config.request_timeout(),
            discovery: config.discovery_timeout(),
        }
    }
}

/// HTTP client bound to one agent endpoint and its auth headers
#[derive(Clone, Debug)]
pub struct A2aClient {
    http: Client,
    endpoint: String,
    headers: HeaderMap,
    timeouts: Timeouts,
}

impl A2aClient {
    pub fn new(http: Client, endpoint: impl Into<String>, headers: HeaderMap) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            headers,
            timeouts: Timeouts::default(),
        }
    }

    /// Client for a registry entry; JSON-RPC requests go to its base URL.
    pub fn for_agent(http: Client, config: &AgentConfig) -> Self {
        Self::new(http, config.base_url.clone(), headers_for(config))
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// `message/send`. Returns the `result` member, `None` when absent.
    pub async fn send_message(&self, instruction: &str) -> A2aResult<Option<Value>> {
        let request = JsonRpcRequest::message_send(instruction)?;
        self.call_rpc(&request).await
    }

    /// `tasks/get`. Returns the `result` member, `None` when absent.
    pub async fn get_task(&self, task_id: &str) -> A2aResult<Option<Value>> {
        let request = JsonRpcRequest::tasks_get(task_id)?;
        self.call_rpc(&request).await
    }

    /// Open a `message/stream` request and hand back its event stream
    /// without reading any event.
    ///
    /// The request limit bounds the wait for response headers and then each
    /// wait for a body chunk, never the stream as a whole.
    pub async fn open_stream(&self, instruction: &str) -> A2aResult<SseEventStream<BodyStream>> {
        let request = JsonRpcRequest::message_stream(instruction)?;
        debug!(
            method = %request.method,
            id = %request.id,
            endpoint = %self.endpoint,
            "Opening A2A stream"
        );

        let limit = self.timeouts.request;
        let send = self
            .http
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .header(ACCEPT, HeaderValue::from_static("text/event-stream"))
            .json(&request)
            .send();
        let response = time::timeout(limit, send)
            .await
            .map_err(|_| A2aError::timed_out("stream request", limit))??;

        let status = response.status();
        if !status.is_success() {
            return Err(A2aError::HttpStatus {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }

        Ok(SseEventStream::from_response(response).with_idle_timeout(limit))
    }

    /// Submit a task over `message/stream` and return its identifier as
    /// soon as one is seen. The connection is closed before returning.
    pub async fn submit_task(&self, instruction: &str) -> A2aResult<String> {
        let mut events = self.open_stream(instruction).await?;
        scan_for_task_id(&mut events).await
    }

    /// Fetch and summarise the agent card.
    pub async fn agent_card(&self) -> A2aResult<AgentCardSummary> {
        let document = fetch_agent_card(
            &self.http,
            &self.endpoint,
            &self.headers,
            self.timeouts.discovery,
        )
        .await?;
        Ok(AgentCardSummary::from_document(&document, &self.endpoint))
    }

    async fn call_rpc(&self, request: &JsonRpcRequest) -> A2aResult<Option<Value>> {
        debug!(
            method = %request.method,
            id = %request.id,
            endpoint = %self.endpoint,
            "Sending A2A request"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .timeout(self.timeouts.request)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(A2aError::HttpStatus {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }

        let body = response.text().await?;
        let parsed: Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(source) => return Err(A2aError::Decode { body, source }),
        };

        match RpcOutcome::from_body(&parsed) {
            RpcOutcome::Error(error) => {
                debug!(id = %request.id, "A2A request returned an error");
                Err(A2aError::Protocol(error))
            }
            RpcOutcome::Result(result) => Ok(result),
        }
    }
}

/// Read events until one carries a task identifier or an error.
///
/// The stream is closed on every exit path: identifier found, protocol
/// error, transport error and exhaustion alike.
pub async fn scan_for_task_id<S, E>(events: &mut SseEventStream<S>) -> A2aResult<String>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: Into<A2aError>,
{
    let outcome = scan_events(events).await;
    events.close();
    outcome
}

async fn scan_events<S, E>(events: &mut SseEventStream<S>) -> A2aResult<String>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: Into<A2aError>,
{
    while let Some(event) = events.next_event().await? {
        let payload: Value = match serde_json::from_str(&event.data) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "Skipping malformed stream event");
                continue;
            }
        };

        if !payload.is_object() {
            warn!("Skipping stream event that is not a JSON object");
            continue;
        }

        match RpcOutcome::from_body(&payload) {
            RpcOutcome::Error(error) => return Err(A2aError::Protocol(error)),
            RpcOutcome::Result(Some(result)) => {
                if let Some(task_id) = task_id_from_result(&result) {
                    debug!(%task_id, "Task identifier received");
                    return Ok(task_id.to_string());
                }
            }
            RpcOutcome::Result(None) => {}
        }
    }

    Err(A2aError::NoTaskId)
}
