//! StreamFetch Core: data model, configuration, error types.

pub mod config;
pub mod error;
pub mod types;

pub use config::{load_channels, DataPaths, StreamFetchConfig, DEFAULT_SECRETS_KEY};
pub use error::{Error, Result};
pub use types::*;
