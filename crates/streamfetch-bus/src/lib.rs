//! Broadcast sinks for severity-tagged notifications.
//!
//! The `EventBus` trait is a one-way call: implementations must not block
//! and report nothing back to the caller.

pub mod sinks;

pub use sinks::{BusEnvelope, ChannelBus, EventBus, NoopBus, TracingBus};
