//! Authorization header derivation for agent requests.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use tracing::warn;

use crate::registry::{AgentConfig, AuthType};

/// `Authorization` value for an auth type and secret, if any.
///
/// `api-key` and unrecognised schemes use bearer framing. For `basic` the
/// secret is expected to be `username:password` and is encoded as-is without
/// checking for the colon.
pub fn authorization_value(auth_type: &AuthType, secret: &str) -> Option<String> {
    if secret.is_empty() {
        return None;
    }

    match auth_type {
        AuthType::None => None,
        AuthType::Basic => Some(format!("Basic {}", STANDARD.encode(secret.as_bytes()))),
        AuthType::Bearer | AuthType::ApiKey | AuthType::Other(_) => {
            Some(format!("Bearer {secret}"))
        }
    }
}

/// Build request headers for an auth type and secret. Never fails: a secret
/// that cannot be carried in a header value yields an empty map.
pub fn build_auth_headers(auth_type: &AuthType, secret: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();

    let Some(value) = authorization_value(auth_type, secret) else {
        return headers;
    };

    match HeaderValue::from_str(&value) {
        Ok(mut header_value) => {
            header_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, header_value);
        }
        Err(err) => {
            warn!(
                auth_type = %auth_type,
                error = %err,
                "Skipping Authorization header with invalid value"
            );
        }
    }

    headers
}

/// Headers for a registered agent.
pub fn headers_for(config: &AgentConfig) -> HeaderMap {
    build_auth_headers(&config.auth_type, &config.api_key)
}
