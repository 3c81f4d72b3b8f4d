//! `EventBus` trait and implementations.
//!
//! - `TracingBus`: re-emits broadcasts as `tracing` events
//! - `ChannelBus`: forwards broadcasts into an unbounded tokio channel
//! - `NoopBus`: discards everything

use chrono::{DateTime, Utc};
use serde::Serialize;
use streamfetch_core::{BroadcastMeta, BroadcastPayload, Level};
use tokio::sync::mpsc;
use tracing::{error, trace, warn};

/// Fire-and-forget broadcast sink.
pub trait EventBus: Send + Sync {
    fn broadcast(&self, meta: BroadcastMeta, payload: BroadcastPayload);
}

/// Logs each broadcast at the matching tracing level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingBus;

impl EventBus for TracingBus {
    fn broadcast(&self, meta: BroadcastMeta, payload: BroadcastPayload) {
        let code = payload.code.as_deref().unwrap_or("");
        let spec = payload
            .spec
            .as_ref()
            .and_then(|s| serde_json::to_string(s).ok())
            .unwrap_or_default();
        match meta.level {
            Level::Warn => warn!(code, spec = %spec, "{}", payload.message),
            Level::Error => error!(code, spec = %spec, "{}", payload.message),
        }
    }
}

/// A broadcast as delivered by `ChannelBus`.
#[derive(Debug, Clone, Serialize)]
pub struct BusEnvelope {
    pub meta: BroadcastMeta,
    pub payload: BroadcastPayload,
    #[serde(rename = "emittedAt")]
    pub emitted_at: DateTime<Utc>,
}

/// Forwards broadcasts to a receiver without waiting on it.
#[derive(Debug, Clone)]
pub struct ChannelBus {
    tx: mpsc::UnboundedSender<BusEnvelope>,
}

impl ChannelBus {
    /// Create a bus and the receiving end of its channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<BusEnvelope>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventBus for ChannelBus {
    fn broadcast(&self, meta: BroadcastMeta, payload: BroadcastPayload) {
        let envelope = BusEnvelope {
            meta,
            payload,
            emitted_at: Utc::now(),
        };
        if self.tx.send(envelope).is_err() {
            // Receiver gone
            trace!("ChannelBus: dropped broadcast, receiver closed");
        }
    }
}

/// Discards all broadcasts.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopBus;

impl EventBus for NoopBus {
    fn broadcast(&self, _meta: BroadcastMeta, _payload: BroadcastPayload) {}
}
