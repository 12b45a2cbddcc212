//! Tracing settings for the relay binary

use serde::{Deserialize, Deserializer, Serialize};

/// Crates traced when `trace_targets` is left empty.
pub const DEFAULT_TRACE_TARGETS: &[&str] = &["a2a_relay_core", "a2a_relay"];

/// Log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl TraceLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warn" | "warning" => Some(Self::Warn),
            "info" => Some(Self::Info),
            "debug" => Some(Self::Debug),
            "trace" => Some(Self::Trace),
            _ => None,
        }
    }
}

impl std::fmt::Display for TraceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Unknown levels fall back to the default rather than rejecting the file.
impl<'de> Deserialize<'de> for TraceLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw).unwrap_or_default())
    }
}

/// `[debug]` section of the relay config
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Turn on structured logging to stderr
    pub enable_tracing: bool,

    /// Level applied to every target
    pub trace_level: TraceLevel,

    /// Targets to enable, e.g. `a2a_relay_core::a2a`
    pub trace_targets: Vec<String>,
}

impl DebugConfig {
    /// `EnvFilter` directive string, e.g. `a2a_relay_core=debug,a2a_relay=debug`.
    pub fn filter_directive(&self) -> String {
        let level = self.trace_level.as_str();
        let targets: Vec<&str> = if self.trace_targets.is_empty() {
            DEFAULT_TRACE_TARGETS.to_vec()
        } else {
            self.trace_targets.iter().map(String::as_str).collect()
        };

        targets
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}
