//! Offline provider backed by a JSON catalog of video assets.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use streamfetch_core::{Error, ProviderParams, Result, VideoPayload};
use tracing::{debug, info};

use crate::client::VideoProviderClient;

/// One catalog record as stored in `catalog.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(rename = "eventId")]
    pub event_id: String,
    pub id: String,
    #[serde(default)]
    pub video: VideoPayload,
}

/// In-memory provider keyed by `(event id, video id)`.
#[derive(Debug, Default, Clone)]
pub struct CatalogClient {
    videos: HashMap<(String, String), VideoPayload>,
    account_id: Option<String>,
}

impl CatalogClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let mut client = Self::new();
        for entry in entries {
            client.insert(entry.event_id, entry.id, entry.video);
        }
        client
    }

    /// Load a catalog file. A missing file yields an empty catalog.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No catalog at {}", path.display());
            return Ok(Self::new());
        }
        let raw = std::fs::read_to_string(path)?;
        let entries: Vec<CatalogEntry> = serde_json::from_str(&raw)?;
        let client = Self::from_entries(entries);
        info!("Loaded {} catalog videos from {}", client.len(), path.display());
        Ok(client)
    }

    /// Only answer requests made with this account id.
    pub fn require_account(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    pub fn insert(
        &mut self,
        event_id: impl Into<String>,
        video_id: impl Into<String>,
        video: VideoPayload,
    ) {
        self.videos.insert((event_id.into(), video_id.into()), video);
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }
}

#[async_trait]
impl VideoProviderClient for CatalogClient {
    async fn get_video(&self, params: &ProviderParams) -> Result<Option<VideoPayload>> {
        if let Some(expected) = &self.account_id {
            if params.account_id() != expected {
                return Err(Error::Provider(format!(
                    "account {} is not authorized",
                    params.account_id()
                )));
            }
        }
        let key = (params.event_id().to_string(), params.id().to_string());
        Ok(self.videos.get(&key).cloned())
    }
}
