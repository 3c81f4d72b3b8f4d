//! Orchestrator - validate, fetch from the provider, transform.

use std::sync::Arc;

use serde_json::Value;
use streamfetch_bus::EventBus;
use streamfetch_core::{
    BroadcastMeta, BroadcastPayload, Channel, FetchArgs, ProviderParams, Result, Spec,
    VideoResource, DEFAULT_SECRETS_KEY, VIDEO_NOT_FOUND,
};
use streamfetch_provider::{ResponseTransformer, VideoProviderClient};
use tracing::debug;
use uuid::Uuid;

use crate::types::*;

/// Handler for `get livestream-video` commands.
///
/// Holds its collaborators for its whole lifetime; each call is independent.
pub struct FetchVideoOrchestrator {
    bus: Arc<dyn EventBus>,
    client: Arc<dyn VideoProviderClient>,
    transform: Arc<dyn ResponseTransformer>,
    secrets_key: String,
}

impl FetchVideoOrchestrator {
    pub fn new(
        bus: Arc<dyn EventBus>,
        client: Arc<dyn VideoProviderClient>,
        transform: Arc<dyn ResponseTransformer>,
    ) -> Self {
        Self {
            bus,
            client,
            transform,
            secrets_key: DEFAULT_SECRETS_KEY.to_string(),
        }
    }

    /// Read credentials from `channel.secrets.<key>` instead of `livestream`.
    pub fn with_secrets_key(mut self, key: impl Into<String>) -> Self {
        self.secrets_key = key.into();
        self
    }

    pub fn secrets_key(&self) -> &str {
        &self.secrets_key
    }

    /// Entry point for loosely-typed dispatcher payloads (`{channel, spec}`).
    pub async fn handle(&self, args: Value) -> Result<FetchOutcome> {
        let args: FetchArgs = serde_json::from_value(args)?;
        self.fetch_video(&args).await
    }

    /// Run one fetch. `Err` only for provider or transform failures.
    pub async fn fetch_video(&self, args: &FetchArgs) -> Result<FetchOutcome> {
        let request_id = Uuid::new_v4();
        debug!(%request_id, channel = %args.channel.id, "fetch_video start");

        let result = self.run(&args.channel, &args.spec).await;
        match &result {
            Ok(outcome) => debug!(%request_id, outcome = outcome.label(), "fetch_video done"),
            Err(e) => debug!(%request_id, error = %e, "fetch_video failed"),
        }
        result
    }

    async fn run(&self, channel: &Channel, spec: &Spec) -> Result<FetchOutcome> {
        let Some(creds) = channel.credentials_for(&self.secrets_key).resolve() else {
            self.bus.broadcast(
                BroadcastMeta::warn(),
                BroadcastPayload::message(format!(
                    "Skipping Livestream fetchVideo due to missing credentials in channel {}",
                    channel.id
                )),
            );
            return Ok(FetchOutcome::Skipped(SkipReason::MissingCredentials));
        };

        let Some(event_id) = spec.event_id() else {
            self.bus.broadcast(
                BroadcastMeta::error(),
                BroadcastPayload::message(format!(
                    "Livestream fetchVideo requires an event ID. channel: {}",
                    channel.id
                )),
            );
            return Ok(FetchOutcome::Invalid(InvalidRequest::MissingEventId));
        };

        let Some(video_id) = spec.video_id() else {
            self.bus.broadcast(
                BroadcastMeta::error(),
                BroadcastPayload::message(format!(
                    "Livestream fetchVideo requires a video ID. channel: {}",
                    channel.id
                )),
            );
            return Ok(FetchOutcome::Invalid(InvalidRequest::MissingVideoId));
        };

        let params = ProviderParams::new(creds, event_id, video_id);

        let Some(payload) = self.client.get_video(&params).await? else {
            self.bus.broadcast(
                BroadcastMeta::error(),
                BroadcastPayload::message("video not found")
                    .with_code(VIDEO_NOT_FOUND)
                    .with_spec(spec.clone()),
            );
            return Ok(FetchOutcome::NotFound(VideoNotFound {
                event_id: params.event_id().to_string(),
                video_id: params.id().to_string(),
            }));
        };

        // The transform signs the stream URL with these.
        let resource = VideoResource::new(payload, params.credentials());
        let output = self.transform.transform(spec, resource).await?;
        Ok(FetchOutcome::Fetched(output))
    }
}
