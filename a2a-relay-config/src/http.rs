//! HTTP timeout settings

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timeout for `message/send`, `message/stream` initiation and `tasks/get`.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Timeout for each agent-card candidate.
pub const DEFAULT_DISCOVERY_TIMEOUT_SECS: u64 = 10;

/// `[http]` section of the relay config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    pub request_timeout_secs: u64,
    pub discovery_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            discovery_timeout_secs: DEFAULT_DISCOVERY_TIMEOUT_SECS,
        }
    }
}

impl HttpConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn discovery_timeout(&self) -> Duration {
        Duration::from_secs(self.discovery_timeout_secs)
    }
}
