//! Configuration for a2a-relay.
//!
//! Holds the host-facing credential slot scheme (`agent_<N>_<field>`), the
//! `a2a-relay.toml` file format and its discovery rules.

pub mod credentials;
pub mod debug;
pub mod http;
pub mod loader;

pub use credentials::{
    agent_slots, apply_env_overrides, slot_key, AgentSlot, CredentialMap, SlotField,
    AGENT_SLOT_COUNT, CREDENTIAL_ENV_PREFIX,
};
pub use debug::{DebugConfig, TraceLevel};
pub use http::{HttpConfig, DEFAULT_DISCOVERY_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS};
pub use loader::{load_dotenv, ConfigError, RelayConfig, CONFIG_FILE_NAME, CONFIG_PATH_ENV};
