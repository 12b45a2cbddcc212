//! Relay configuration file discovery and loading

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::credentials::{apply_env_overrides, CredentialMap};
use crate::debug::DebugConfig;
use crate::http::HttpConfig;

/// File looked up in the current directory when nothing else is given.
pub const CONFIG_FILE_NAME: &str = "a2a-relay.toml";

/// Environment variable pointing at an explicit config file.
pub const CONFIG_PATH_ENV: &str = "A2A_RELAY_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Complete relay configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Flat `agent_<N>_<field>` credential map
    pub credentials: CredentialMap,
    pub http: HttpConfig,
    pub debug: DebugConfig,
}

impl RelayConfig {
    pub fn from_toml_str(contents: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents, path)
    }

    /// Load configuration for the relay binary.
    ///
    /// Resolution order: the explicit path, then `A2A_RELAY_CONFIG`, then
    /// `./a2a-relay.toml` if it exists, else defaults. `A2A_AGENT_<N>_<FIELD>`
    /// variables are applied on top of whichever file was used.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match Self::resolve_path(explicit) {
            Some(path) => Self::load_from_file(&path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
            None => {
                tracing::debug!("no config file found, using defaults");
                Self::default()
            }
        };

        let applied = apply_env_overrides(&mut config.credentials, std::env::vars());
        if applied > 0 {
            tracing::debug!(applied, "applied credential overrides from environment");
        }

        Ok(config)
    }

    fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        if let Ok(raw) = std::env::var(CONFIG_PATH_ENV) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }

        let local = PathBuf::from(CONFIG_FILE_NAME);
        local.exists().then_some(local)
    }
}

/// Load environment variables from a `.env` file in the current directory.
///
/// A missing file is fine; a file that exists but cannot be parsed only logs a
/// warning.
pub fn load_dotenv() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!("Loaded environment variables from: {}", path.display());
            Ok(())
        }
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => {
            tracing::warn!("Failed to load .env file: {}", e);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::TraceLevel;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_empty_file_yields_defaults() {
        let cfg = RelayConfig::from_toml_str("", Path::new("inline")).unwrap();
        assert_eq!(cfg, RelayConfig::default());
        assert_eq!(cfg.http.request_timeout_secs, 60);
        assert_eq!(cfg.http.discovery_timeout_secs, 10);
    }

    #[test]
    fn test_full_file() {
        let contents = r#"
[credentials]
agent_1_name = "sales"
agent_1_url = "https://sales.example.com"
agent_1_auth_type = "bearer"
agent_1_api_key = "sales-key"

[http]
request_timeout_secs = 5

[debug]
enable_tracing = true
trace_level = "debug"
"#;
        let cfg = RelayConfig::from_toml_str(contents, Path::new("inline")).unwrap();
        assert_eq!(cfg.credentials["agent_1_name"], "sales");
        assert_eq!(cfg.credentials.len(), 4);
        assert_eq!(cfg.http.request_timeout_secs, 5);
        assert_eq!(cfg.http.discovery_timeout_secs, 10);
        assert!(cfg.debug.enable_tracing);
        assert_eq!(cfg.debug.trace_level, TraceLevel::Debug);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[credentials]\nagent_2_name = \"support\"").unwrap();

        let cfg = RelayConfig::load_from_file(file.path()).unwrap();
        assert_eq!(cfg.credentials["agent_2_name"], "support");
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = RelayConfig::from_toml_str("[credentials", Path::new("broken.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RelayConfig::load_from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
