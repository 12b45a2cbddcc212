//! Agent registry built from the host's credential slots.
//!
//! The registry is a pure function of the credentials at call time. It is
//! rebuilt for every operation and never cached, since the host may change
//! credentials between calls. Configuration-time validation and call-time
//! construction go through [`AgentRegistry::build`], so both apply the same
//! rules.

use std::fmt;

use a2a_relay_config::{agent_slots, AgentSlot, CredentialMap, AGENT_SLOT_COUNT};
use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

use crate::a2a::ErrorCategory;

/// How requests to an agent are authenticated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthType {
    #[default]
    None,
    Bearer,
    ApiKey,
    Basic,
    /// Unrecognised scheme, kept verbatim
    Other(String),
}

impl AuthType {
    /// Parse a trimmed auth type. An empty value means "unset" and reads as
    /// [`AuthType::None`].
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" | "none" => AuthType::None,
            "bearer" => AuthType::Bearer,
            "api-key" => AuthType::ApiKey,
            "basic" => AuthType::Basic,
            other => AuthType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            AuthType::None => "none",
            AuthType::Bearer => "bearer",
            AuthType::ApiKey => "api-key",
            AuthType::Basic => "basic",
            AuthType::Other(raw) => raw,
        }
    }

    pub fn requires_credential(&self) -> bool {
        !matches!(self, AuthType::None)
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection settings for one registered agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    pub base_url: String,
    pub auth_type: AuthType,
    pub api_key: String,
    pub description: String,
}

impl AgentConfig {
    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// Fatal registry construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Agent {slot} ({name}): Base URL is required when agent name is provided")]
    MissingUrl { slot: usize, name: String },

    #[error("Agent {slot} ({name}): API Key/Token is required when auth type is '{auth_type}'")]
    MissingCredential {
        slot: usize,
        name: String,
        auth_type: String,
    },

    #[error("Duplicate agent name '{0}' found. Each agent must have a unique name.")]
    DuplicateAgentName(String),

    #[error("At least one agent must be configured. Please fill in Agent 1 fields.")]
    EmptyRegistry,
}

impl RegistryError {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Configuration
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Result of evaluating a single slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotOutcome {
    Entry { name: String, config: AgentConfig },
    Skip,
    Fatal(RegistryError),
}

/// Evaluate one slot in isolation. Duplicate detection needs the other slots
/// and happens in [`AgentRegistry::from_slots`].
pub fn evaluate_slot(slot: &AgentSlot) -> SlotOutcome {
    let name = slot.name.trim();
    if name.is_empty() {
        return SlotOutcome::Skip;
    }

    let base_url = slot.url.trim();
    if base_url.is_empty() {
        return SlotOutcome::Fatal(RegistryError::MissingUrl {
            slot: slot.index,
            name: name.to_string(),
        });
    }

    let auth_type = AuthType::parse(&slot.auth_type);
    let api_key = slot.api_key.trim();
    if auth_type.requires_credential() && api_key.is_empty() {
        return SlotOutcome::Fatal(RegistryError::MissingCredential {
            slot: slot.index,
            name: name.to_string(),
            auth_type: auth_type.to_string(),
        });
    }

    // A secret configured next to `none` is never sent, so it is not kept.
    let api_key = if auth_type.requires_credential() {
        api_key.to_string()
    } else {
        String::new()
    };

    SlotOutcome::Entry {
        name: name.to_string(),
        config: AgentConfig {
            base_url: base_url.to_string(),
            auth_type,
            api_key,
            description: slot.description.trim().to_string(),
        },
    }
}

/// Mapping from agent name to its connection settings, in slot order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentRegistry {
    agents: IndexMap<String, AgentConfig>,
}

impl AgentRegistry {
    /// Build the registry from a flat credential map.
    pub fn build(credentials: &CredentialMap) -> RegistryResult<Self> {
        Self::from_slots(&agent_slots(credentials))
    }

    /// Build the registry from explicit slots. Only the first
    /// [`AGENT_SLOT_COUNT`] slots are considered.
    pub fn from_slots(slots: &[AgentSlot]) -> RegistryResult<Self> {
        let mut agents = IndexMap::new();

        for slot in slots.iter().take(AGENT_SLOT_COUNT) {
            match evaluate_slot(slot) {
                SlotOutcome::Skip => continue,
                SlotOutcome::Fatal(err) => return Err(err),
                SlotOutcome::Entry { name, config } => {
                    if agents.contains_key(&name) {
                        return Err(RegistryError::DuplicateAgentName(name));
                    }
                    agents.insert(name, config);
                }
            }
        }

        if agents.is_empty() {
            return Err(RegistryError::EmptyRegistry);
        }

        Ok(Self { agents })
    }

    pub fn get(&self, name: &str) -> Option<&AgentConfig> {
        self.agents.get(name)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AgentConfig)> {
        self.agents.iter().map(|(name, config)| (name.as_str(), config))
    }

    /// Public view of every agent. Secrets are reduced to a flag.
    pub fn listing(&self) -> Vec<AgentListing> {
        self.iter()
            .map(|(name, config)| AgentListing {
                name: name.to_string(),
                base_url: config.base_url.clone(),
                auth_type: config.auth_type.to_string(),
                description: config.description.clone(),
                has_credentials: config.has_credentials(),
            })
            .collect()
    }
}

/// One row of the agent listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentListing {
    pub name: String,
    pub base_url: String,
    pub auth_type: String,
    pub description: String,
    pub has_credentials: bool,
}

/// Configuration-time check: succeeds iff the credentials produce a usable
/// registry.
pub fn validate_credentials(credentials: &CredentialMap) -> RegistryResult<()> {
    AgentRegistry::build(credentials).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn creds(entries: &[(&str, &str)]) -> CredentialMap {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn agent(n: usize, name: &str, url: &str, auth: &str, key: &str) -> Vec<(String, String)> {
        vec![
            (format!("agent_{n}_name"), name.to_string()),
            (format!("agent_{n}_url"), url.to_string()),
            (format!("agent_{n}_auth_type"), auth.to_string()),
            (format!("agent_{n}_api_key"), key.to_string()),
            (format!("agent_{n}_description"), format!("{name} agent")),
        ]
    }

    #[test]
    fn test_auth_type_parsing() {
        assert_eq!(AuthType::parse("bearer"), AuthType::Bearer);
        assert_eq!(AuthType::parse(" api-key "), AuthType::ApiKey);
        assert_eq!(AuthType::parse("basic"), AuthType::Basic);
        assert_eq!(AuthType::parse(""), AuthType::None);
        assert_eq!(AuthType::parse("none"), AuthType::None);
        assert_eq!(AuthType::parse("oauth"), AuthType::Other("oauth".to_string()));
        assert_eq!(AuthType::parse("oauth").to_string(), "oauth");
    }

    #[test]
    fn test_skips_empty_and_whitespace_names() {
        let registry = AgentRegistry::build(&creds(&[
            ("agent_1_name", "   "),
            ("agent_1_url", "https://ignored.example.com"),
            ("agent_2_name", "support"),
            ("agent_2_url", "https://support.example.com"),
        ]))
        .unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.get("support").is_some());
    }

    #[test]
    fn test_trims_every_field() {
        let registry = AgentRegistry::build(&creds(&[
            ("agent_1_name", " sales "),
            ("agent_1_url", " https://sales.example.com "),
            ("agent_1_auth_type", " bearer "),
            ("agent_1_api_key", " key "),
            ("agent_1_description", " Sales expert "),
        ]))
        .unwrap();
        let config = registry.get("sales").unwrap();
        assert_eq!(config.base_url, "https://sales.example.com");
        assert_eq!(config.auth_type, AuthType::Bearer);
        assert_eq!(config.api_key, "key");
        assert_eq!(config.description, "Sales expert");
    }

    #[test]
    fn test_missing_url_is_fatal() {
        let err = AgentRegistry::build(&creds(&[
            ("agent_1_name", "ok"),
            ("agent_1_url", "https://ok.example.com"),
            ("agent_2_name", "broken"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            RegistryError::MissingUrl {
                slot: 2,
                name: "broken".to_string()
            }
        );
        assert_eq!(
            err.to_string(),
            "Agent 2 (broken): Base URL is required when agent name is provided"
        );
    }

    #[test]
    fn test_missing_credential_is_fatal() {
        let err = AgentRegistry::build(&creds(&[
            ("agent_1_name", "secure"),
            ("agent_1_url", "https://secure.example.com"),
            ("agent_1_auth_type", "basic"),
            ("agent_1_api_key", "   "),
        ]))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Agent 1 (secure): API Key/Token is required when auth type is 'basic'"
        );
    }

    #[test]
    fn test_unknown_auth_type_still_requires_credential() {
        let err = AgentRegistry::build(&creds(&[
            ("agent_1_name", "custom"),
            ("agent_1_url", "https://custom.example.com"),
            ("agent_1_auth_type", "oauth"),
        ]))
        .unwrap_err();
        assert!(matches!(err, RegistryError::MissingCredential { .. }));
    }

    #[test]
    fn test_duplicate_names_after_trim() {
        let mut entries = agent(1, "sales", "https://a.example.com", "none", "");
        entries.extend(agent(3, " sales ", "https://b.example.com", "none", ""));
        let err = AgentRegistry::build(&entries.into_iter().collect()).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateAgentName("sales".to_string()));
    }

    #[test]
    fn test_empty_registry() {
        let err = AgentRegistry::build(&CredentialMap::new()).unwrap_err();
        assert_eq!(err, RegistryError::EmptyRegistry);
        assert_eq!(validate_credentials(&CredentialMap::new()), Err(RegistryError::EmptyRegistry));
    }

    #[test]
    fn test_entry_count_matches_named_slots() {
        let mut entries = Vec::new();
        for n in [1, 2, 4, 5] {
            entries.extend(agent(n, &format!("agent-{n}"), "https://x.example.com", "bearer", "k"));
        }
        let registry = AgentRegistry::build(&entries.into_iter().collect()).unwrap();
        assert_eq!(registry.len(), 4);
        let names: Vec<&str> = registry.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["agent-1", "agent-2", "agent-4", "agent-5"]);
    }

    #[test]
    fn test_from_slots_enforces_slot_limit() {
        let slots: Vec<AgentSlot> = (1..=7)
            .map(|index| AgentSlot {
                index,
                name: format!("agent-{index}"),
                url: "https://x.example.com".to_string(),
                ..AgentSlot::default()
            })
            .collect();
        let registry = AgentRegistry::from_slots(&slots).unwrap();
        assert_eq!(registry.len(), AGENT_SLOT_COUNT);
        assert!(registry.get("agent-6").is_none());
    }

    #[test]
    fn test_listing_hides_secrets() {
        let mut entries = agent(1, "sales", "https://sales.example.com", "bearer", "sales-key-123");
        entries.extend(agent(2, "support", "https://support.example.com", "none", "stray"));
        let registry = AgentRegistry::build(&entries.into_iter().collect()).unwrap();

        let listing = registry.listing();
        assert_eq!(listing.len(), 2);
        assert!(listing[0].has_credentials);
        assert!(!listing[1].has_credentials);
        assert_eq!(listing[1].auth_type, "none");

        let json = serde_json::to_string(&listing).unwrap();
        assert!(!json.contains("sales-key-123"));
        assert!(!json.contains("stray"));
    }

    #[test]
    fn test_evaluate_slot_outcomes() {
        assert_eq!(evaluate_slot(&AgentSlot::default()), SlotOutcome::Skip);

        let slot = AgentSlot {
            index: 4,
            name: "a".to_string(),
            ..AgentSlot::default()
        };
        assert!(matches!(
            evaluate_slot(&slot),
            SlotOutcome::Fatal(RegistryError::MissingUrl { slot: 4, .. })
        ));
    }
}
