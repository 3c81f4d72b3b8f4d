//! Runtime types.

use serde::Serialize;
use serde_json::Value;
use streamfetch_core::{Error, Result};

/// Why a request was skipped before reaching the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Channel lacks `apiKey`, `accountId` or `clientId`.
    MissingCredentials,
}

/// Which identifying field the request spec is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidRequest {
    MissingEventId,
    MissingVideoId,
}

/// The provider had no asset for the requested (event, video) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoNotFound {
    pub event_id: String,
    pub video_id: String,
}

impl std::fmt::Display for VideoNotFound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Video not found for event id \"{}\" video id \"{}\"",
            self.event_id, self.video_id
        )
    }
}

impl From<VideoNotFound> for Error {
    fn from(err: VideoNotFound) -> Self {
        Error::VideoNotFound {
            event_id: err.event_id,
            video_id: err.video_id,
        }
    }
}

/// Result of one fetch-video invocation.
///
/// Upstream failures (provider or transform) are not outcomes; they come
/// back as `Err` from the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Skipped(SkipReason),
    Invalid(InvalidRequest),
    NotFound(VideoNotFound),
    /// Exactly what the transform returned.
    Fetched(Value),
}

impl FetchOutcome {
    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }

    /// Short name used in log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Skipped(_) => "skipped",
            Self::Invalid(_) => "invalid",
            Self::NotFound(_) => "not_found",
            Self::Fetched(_) => "fetched",
        }
    }

    /// Collapse into the command-handler convention: skips and invalid
    /// requests resolve to `None`, not-found becomes an error.
    pub fn into_result(self) -> Result<Option<Value>> {
        match self {
            Self::Skipped(_) | Self::Invalid(_) => Ok(None),
            Self::NotFound(not_found) => Err(not_found.into()),
            Self::Fetched(value) => Ok(Some(value)),
        }
    }
}

/// Dispatcher pattern a handler is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommandPattern {
    pub role: &'static str,
    pub cmd: &'static str,
    pub source: &'static str,
}

/// `{role: "provider", cmd: "get", source: "livestream-video"}`
pub const FETCH_VIDEO_COMMAND: CommandPattern = CommandPattern {
    role: "provider",
    cmd: "get",
    source: "livestream-video",
};

impl CommandPattern {
    /// True when every pattern field appears in `command` with the same value.
    pub fn matches(&self, command: &Value) -> bool {
        [("role", self.role), ("cmd", self.cmd), ("source", self.source)]
            .into_iter()
            .all(|(key, expected)| command.get(key).and_then(Value::as_str) == Some(expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_into_result_mapping() {
        assert!(FetchOutcome::Skipped(SkipReason::MissingCredentials)
            .into_result()
            .unwrap()
            .is_none());
        assert!(FetchOutcome::Invalid(InvalidRequest::MissingVideoId)
            .into_result()
            .unwrap()
            .is_none());

        let fetched = FetchOutcome::Fetched(json!({"url": "https://cdn/v1.m3u8"}));
        assert_eq!(
            fetched.into_result().unwrap(),
            Some(json!({"url": "https://cdn/v1.m3u8"}))
        );

        let err = FetchOutcome::NotFound(VideoNotFound {
            event_id: "e1".into(),
            video_id: "v1".into(),
        })
        .into_result()
        .unwrap_err();
        assert!(matches!(err, Error::VideoNotFound { .. }));
        assert_eq!(err.to_string(), "Video not found for event id \"e1\" video id \"v1\"");
    }

    #[test]
    fn test_labels() {
        assert_eq!(FetchOutcome::Skipped(SkipReason::MissingCredentials).label(), "skipped");
        assert_eq!(FetchOutcome::Invalid(InvalidRequest::MissingEventId).label(), "invalid");
        assert_eq!(FetchOutcome::Fetched(Value::Null).label(), "fetched");
        assert!(!FetchOutcome::Invalid(InvalidRequest::MissingEventId).is_fetched());
    }

    #[test]
    fn test_command_pattern_matches() {
        assert!(FETCH_VIDEO_COMMAND.matches(&json!({
            "role": "provider",
            "cmd": "get",
            "source": "livestream-video",
            "channel": {"id": "c1"}
        })));
        assert!(!FETCH_VIDEO_COMMAND.matches(&json!({
            "role": "provider",
            "cmd": "get",
            "source": "jwplayer-video"
        })));
        assert!(!FETCH_VIDEO_COMMAND.matches(&json!({"role": "provider", "cmd": "get"})));
        assert!(!FETCH_VIDEO_COMMAND.matches(&json!("provider")));
    }
}
