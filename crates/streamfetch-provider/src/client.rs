//! Video provider client trait.

use async_trait::async_trait;
use streamfetch_core::{ProviderParams, Result, VideoPayload};

/// Looks up a video asset on the provider.
#[async_trait]
pub trait VideoProviderClient: Send + Sync {
    /// Fetch the video identified by `params`.
    ///
    /// Returns `Ok(None)` when the (event, video) pair has no matching asset.
    async fn get_video(&self, params: &ProviderParams) -> Result<Option<VideoPayload>>;
}
