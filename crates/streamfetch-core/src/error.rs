//! Error types for StreamFetch.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Video not found for event id \"{event_id}\" video id \"{video_id}\"")]
    VideoNotFound { event_id: String, video_id: String },

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Transform error: {0}")]
    Transform(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
