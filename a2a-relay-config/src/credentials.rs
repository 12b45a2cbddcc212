//! Raw agent credential slots.
//!
//! The host hands credentials over as a flat string map using the key scheme
//! `agent_<N>_<field>` for `N` in `1..=5`. This module only extracts those
//! values; trimming and validation belong to the registry.

use std::collections::BTreeMap;

/// Fixed number of agent slots the host exposes.
pub const AGENT_SLOT_COUNT: usize = 5;

/// Prefix for environment variables that override credential fields,
/// e.g. `A2A_AGENT_1_URL`.
pub const CREDENTIAL_ENV_PREFIX: &str = "A2A_";

/// Flat credential mapping as supplied by the host.
pub type CredentialMap = BTreeMap<String, String>;

/// One of the five fields every slot carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotField {
    Name,
    Url,
    AuthType,
    ApiKey,
    Description,
}

impl SlotField {
    pub const ALL: [SlotField; 5] = [
        SlotField::Name,
        SlotField::Url,
        SlotField::AuthType,
        SlotField::ApiKey,
        SlotField::Description,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SlotField::Name => "name",
            SlotField::Url => "url",
            SlotField::AuthType => "auth_type",
            SlotField::ApiKey => "api_key",
            SlotField::Description => "description",
        }
    }
}

/// Credential key for a slot field, e.g. `agent_3_api_key`.
pub fn slot_key(index: usize, field: SlotField) -> String {
    format!("agent_{}_{}", index, field.as_str())
}

/// Raw, untrimmed contents of a single credential slot. Empty strings mean
/// "unset".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentSlot {
    /// 1-based slot position
    pub index: usize,
    pub name: String,
    pub url: String,
    pub auth_type: String,
    pub api_key: String,
    pub description: String,
}

impl AgentSlot {
    /// Read slot `index` (1-based) out of a credential map. Missing keys read
    /// as empty strings.
    pub fn from_map(credentials: &CredentialMap, index: usize) -> Self {
        let read = |field: SlotField| {
            credentials
                .get(&slot_key(index, field))
                .cloned()
                .unwrap_or_default()
        };

        Self {
            index,
            name: read(SlotField::Name),
            url: read(SlotField::Url),
            auth_type: read(SlotField::AuthType),
            api_key: read(SlotField::ApiKey),
            description: read(SlotField::Description),
        }
    }
}

/// All five slots in positional order.
pub fn agent_slots(credentials: &CredentialMap) -> Vec<AgentSlot> {
    (1..=AGENT_SLOT_COUNT)
        .map(|index| AgentSlot::from_map(credentials, index))
        .collect()
}

/// Overlay `A2A_AGENT_<N>_<FIELD>` variables onto a credential map.
///
/// Only keys that belong to one of the five slots are accepted; anything else
/// carrying the prefix is ignored. Returns the number of overridden keys.
pub fn apply_env_overrides<I>(credentials: &mut CredentialMap, vars: I) -> usize
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut applied = 0;
    for (key, value) in vars {
        let Some(rest) = key.strip_prefix(CREDENTIAL_ENV_PREFIX) else {
            continue;
        };
        let candidate = rest.to_ascii_lowercase();
        if is_credential_key(&candidate) {
            credentials.insert(candidate, value);
            applied += 1;
        }
    }
    applied
}

fn is_credential_key(key: &str) -> bool {
    (1..=AGENT_SLOT_COUNT).any(|index| {
        SlotField::ALL
            .iter()
            .any(|field| slot_key(index, *field) == key)
    })
}
