//! Agent card discovery over the well-known paths.

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::errors::{describe_transport_error, A2aError, A2aResult};

/// Candidate card files under `/.well-known/`, in the order they are tried
pub const AGENT_CARD_FILES: [&str; 2] = ["agent-card.json", "agent.json"];

const DEFAULT_NAME: &str = "Unknown Agent";
const DEFAULT_DESCRIPTION: &str = "No description provided.";
const DEFAULT_PROTOCOL_VERSION: &str = "unknown";

pub fn agent_card_url(base_url: &str, file: &str) -> String {
    format!("{}/.well-known/{}", base_url.trim_end_matches('/'), file)
}

/// Fixed projection of an agent card
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCardSummary {
    pub name: Value,
    pub description: Value,
    pub protocol_version: Value,
    pub capabilities: Value,
    pub skills: Value,
    pub security_schemes: Value,
    pub url: Value,
}

impl AgentCardSummary {
    /// Project a raw card document. Missing or null members take their
    /// defaults; present members are carried over unchanged, whatever their
    /// shape. `url` defaults to the base URL the card was requested from.
    pub fn from_document(document: &Value, base_url: &str) -> Self {
        let field = |key: &str, default: Value| -> Value {
            document
                .get(key)
                .filter(|value| !value.is_null())
                .cloned()
                .unwrap_or(default)
        };

        Self {
            name: field("name", Value::from(DEFAULT_NAME)),
            description: field("description", Value::from(DEFAULT_DESCRIPTION)),
            protocol_version: field("protocolVersion", Value::from(DEFAULT_PROTOCOL_VERSION)),
            capabilities: field("capabilities", Value::Object(Map::new())),
            skills: field("skills", Value::Array(Vec::new())),
            security_schemes: field("securitySchemes", Value::Object(Map::new())),
            url: field("url", Value::from(base_url)),
        }
    }
}

/// Fetch the raw card document, trying each candidate in order.
///
/// Each candidate gets its own `timeout`. A transport failure, non-2xx status
/// or unparseable body moves on to the next candidate; when every candidate
/// fails the last failure is reported.
pub async fn fetch_agent_card(
    http: &Client,
    base_url: &str,
    headers: &HeaderMap,
    timeout: Duration,
) -> A2aResult<Value> {
    let mut last_error = String::new();

    for file in AGENT_CARD_FILES {
        let url = agent_card_url(base_url, file);
        debug!(%url, "Fetching agent card");

        match fetch_candidate(http, &url, headers, timeout).await {
            Ok(document) => return Ok(document),
            Err(detail) => {
                warn!(%url, error = %detail, "Agent card candidate failed");
                last_error = format!("{file}: {detail}");
            }
        }
    }

    Err(A2aError::DiscoveryFailed { last_error })
}

async fn fetch_candidate(
    http: &Client,
    url: &str,
    headers: &HeaderMap,
    timeout: Duration,
) -> Result<Value, String> {
    let response = http
        .get(url)
        .headers(headers.clone())
        .timeout(timeout)
        .send()
        .await
        .map_err(|err| describe_transport_error(&err))?;

    let status = response.status();
    if !status.is_success() {
        return Err(format!("HTTP {} for url: {url}", status.as_u16()));
    }

    let body = response
        .text()
        .await
        .map_err(|err| describe_transport_error(&err))?;

    serde_json::from_str(&body).map_err(|err| format!("Invalid JSON - {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn timeout() -> Duration {
        Duration::from_secs(5)
    }

    #[test]
    fn test_card_url_strips_trailing_slash() {
        assert_eq!(
            agent_card_url("https://agent.example.com/", "agent.json"),
            "https://agent.example.com/.well-known/agent.json"
        );
    }

    #[test]
    fn test_summary_defaults() {
        let summary = AgentCardSummary::from_document(&json!({"name": "Echo"}), "http://base");
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Echo",
                "description": "No description provided.",
                "protocolVersion": "unknown",
                "capabilities": {},
                "skills": [],
                "securitySchemes": {},
                "url": "http://base"
            })
        );
    }

    #[test]
    fn test_summary_keeps_present_fields() {
        let document = json!({
            "name": "Planner",
            "description": "Plans things",
            "protocolVersion": "0.3.0",
            "capabilities": {"streaming": true},
            "skills": [{"id": "plan"}],
            "securitySchemes": {"bearer": {"type": "http"}},
            "url": "https://planner.example.com/rpc",
            "provider": {"organization": "ignored"}
        });
        let summary = AgentCardSummary::from_document(&document, "http://base");
        assert_eq!(summary.url, json!("https://planner.example.com/rpc"));
        assert_eq!(summary.capabilities, json!({"streaming": true}));
        assert_eq!(summary.skills, json!([{"id": "plan"}]));
        assert!(serde_json::to_value(&summary).unwrap().get("provider").is_none());
    }

    #[tokio::test]
    async fn test_falls_back_to_second_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/.well-known/agent-card.json"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/.well-known/agent.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Fallback Agent",
                "skills": [{"id": "echo"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let document = fetch_agent_card(&Client::new(), &server.uri(), &HeaderMap::new(), timeout())
            .await
            .unwrap();
        let summary = AgentCardSummary::from_document(&document, &server.uri());

        assert_eq!(summary.name, json!("Fallback Agent"));
        assert_eq!(summary.skills, json!([{"id": "echo"}]));
        assert_eq!(summary.protocol_version, json!("unknown"));
        assert_eq!(summary.url, json!(server.uri()));
    }

    #[tokio::test]
    async fn test_invalid_json_moves_to_next_candidate() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/.well-known/agent-card.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/.well-known/agent.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "B"})))
            .mount(&server)
            .await;

        let document = fetch_agent_card(&Client::new(), &server.uri(), &HeaderMap::new(), timeout())
            .await
            .unwrap();
        assert_eq!(document["name"], "B");
    }

    #[tokio::test]
    async fn test_both_candidates_failing_reports_last_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = fetch_agent_card(&Client::new(), &server.uri(), &HeaderMap::new(), timeout())
            .await
            .unwrap_err();
        let text = err.to_string();
        assert!(text.starts_with(
            "Failed to fetch Agent Card from both paths. Last error: agent.json: "
        ));
        assert!(text.contains("404"));
    }

    #[tokio::test]
    async fn test_sends_auth_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/.well-known/agent-card.json"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Private"})))
            .expect(1)
            .mount(&server)
            .await;

        let headers = crate::auth::build_auth_headers(&crate::registry::AuthType::Bearer, "secret");
        let document = fetch_agent_card(&Client::new(), &server.uri(), &headers, timeout())
            .await
            .unwrap();
        assert_eq!(document["name"], "Private");
    }
}
