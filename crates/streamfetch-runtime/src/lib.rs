//! Fetch-video orchestrator: the `livestream-video` provider handler.
//!
//! Validates channel credentials and the request spec, calls the video
//! provider, attaches signing credentials to the result and hands it to
//! the response transform.

pub mod orchestrator;
pub mod types;

pub use orchestrator::FetchVideoOrchestrator;
pub use types::*;
