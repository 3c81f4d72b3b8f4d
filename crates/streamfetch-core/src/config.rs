//! Configuration and data directory management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::Channel;

/// Key under `channel.secrets` holding the provider credentials.
pub const DEFAULT_SECRETS_KEY: &str = "livestream";

/// Paths to StreamFetch data files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Channel definitions (`data/channels.json`).
    pub channels_file: PathBuf,
    /// Offline provider catalog (`data/catalog.json`).
    pub catalog_file: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            channels_file: root.join("channels.json"),
            catalog_file: root.join("catalog.json"),
            root,
        }
    }
}

/// Top-level StreamFetch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamFetchConfig {
    /// Provider name looked up in `channel.secrets`.
    pub secrets_key: String,
    /// Data file paths.
    pub data_paths: DataPaths,
}

impl StreamFetchConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> Result<Self> {
        let secrets_key = parse_secrets_key(std::env::var("STREAMFETCH_SECRETS_KEY").ok())?;

        Ok(Self {
            secrets_key,
            data_paths: DataPaths::new(data_dir),
        })
    }
}

/// Validate a secrets key override. Unset falls back to the default.
fn parse_secrets_key(raw: Option<String>) -> Result<String> {
    let Some(key) = raw else {
        return Ok(DEFAULT_SECRETS_KEY.to_string());
    };
    if key.is_empty() || key.chars().any(char::is_whitespace) {
        return Err(Error::Config(format!(
            "STREAMFETCH_SECRETS_KEY must be a non-empty name without whitespace, got {:?}",
            key
        )));
    }
    Ok(key)
}

/// Load channel definitions from a JSON array. A missing file is an empty list.
pub fn load_channels(path: &Path) -> Result<Vec<Channel>> {
    if !path.exists() {
        debug!("No channel file at {}", path.display());
        return Ok(Vec::new());
    }
    let raw = std::fs::read_to_string(path)?;
    let channels: Vec<Channel> = serde_json::from_str(&raw)?;
    info!("Loaded {} channels from {}", channels.len(), path.display());
    Ok(channels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_paths() {
        let paths = DataPaths::new("/tmp/sf");
        assert_eq!(paths.channels_file, PathBuf::from("/tmp/sf/channels.json"));
        assert_eq!(paths.catalog_file, PathBuf::from("/tmp/sf/catalog.json"));
    }

    #[test]
    fn test_secrets_key_default_and_override() {
        assert_eq!(parse_secrets_key(None).unwrap(), DEFAULT_SECRETS_KEY);
        assert_eq!(
            parse_secrets_key(Some("livestream-staging".into())).unwrap(),
            "livestream-staging"
        );
    }

    #[test]
    fn test_secrets_key_rejects_blank_or_spaced() {
        for raw in ["", "   ", "live stream"] {
            let err = parse_secrets_key(Some(raw.into())).unwrap_err();
            assert!(matches!(err, Error::Config(_)), "accepted {:?}", raw);
        }
    }

    #[test]
    fn test_load_channels_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let channels = load_channels(&dir.path().join("channels.json")).unwrap();
        assert!(channels.is_empty());
    }

    #[test]
    fn test_load_channels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("channels.json");
        std::fs::write(
            &path,
            r#"[
                {"id": "c1", "secrets": {"livestream": {"apiKey": "k", "accountId": "a", "clientId": "cl"}}},
                {"id": "c2"}
            ]"#,
        )
        .unwrap();

        let channels = load_channels(&path).unwrap();
        assert_eq!(channels.len(), 2);
        assert!(channels[0].credentials_for("livestream").resolve().is_some());
        assert!(channels[1].credentials_for("livestream").resolve().is_none());
    }

    #[test]
    fn test_load_channels_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("channels.json");
        std::fs::write(&path, "{\"id\": ").unwrap();
        assert!(matches!(load_channels(&path), Err(Error::Json(_))));
    }
}
