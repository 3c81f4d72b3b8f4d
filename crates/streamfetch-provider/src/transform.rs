//! Response transform trait.

use async_trait::async_trait;
use serde_json::Value;
use streamfetch_core::{Result, Spec, VideoResource};

/// Turns a provider resource into the final consumable resource.
#[async_trait]
pub trait ResponseTransformer: Send + Sync {
    async fn transform(&self, spec: &Spec, resource: VideoResource) -> Result<Value>;
}

/// Returns the resource unchanged, serialised to JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughTransform;

#[async_trait]
impl ResponseTransformer for PassthroughTransform {
    async fn transform(&self, _spec: &Spec, resource: VideoResource) -> Result<Value> {
        resource.into_value()
    }
}
