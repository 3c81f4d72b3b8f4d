//! Provider seams: the video provider client and the response transform.
//!
//! `CatalogClient` answers `get_video` from an in-memory catalog, and
//! `PassthroughTransform` hands the credential-augmented resource back as
//! JSON. Both exist so the handler can run without a network provider.

pub mod catalog;
pub mod client;
pub mod transform;

pub use catalog::{CatalogClient, CatalogEntry};
pub use client::VideoProviderClient;
pub use transform::{PassthroughTransform, ResponseTransformer};
