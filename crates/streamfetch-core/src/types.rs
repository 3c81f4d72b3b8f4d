//! Request, credential, and broadcast types shared across the workspace.
//!
//! Field names on the wire are camelCase (`apiKey`, `accountId`, `eventId`)
//! to match the command payloads produced by the dispatcher.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Machine-readable code attached to the not-found broadcast.
pub const VIDEO_NOT_FOUND: &str = "VIDEO_NOT_FOUND";

/// A string counts as present only when it is set and non-empty.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------
// Channel + credentials
// ---------------------------------------------------------------

/// A configured content source carrying per-provider credentials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    /// Provider name → secret. Kept as raw JSON: only the entry for the
    /// configured provider is ever read, and other providers' secrets may
    /// have any shape. `None` behaves like an empty map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secrets: Option<Map<String, Value>>,
}

impl Channel {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            secrets: None,
        }
    }

    /// Attach a credential bundle for `provider`.
    pub fn with_secrets(self, provider: impl Into<String>, bundle: CredentialBundle) -> Self {
        let value = serde_json::to_value(&bundle).unwrap_or(Value::Null);
        self.with_raw_secret(provider, value)
    }

    /// Attach an arbitrary secret value for `provider`.
    pub fn with_raw_secret(mut self, provider: impl Into<String>, secret: Value) -> Self {
        self.secrets
            .get_or_insert_with(Map::new)
            .insert(provider.into(), secret);
        self
    }

    /// Credential bundle for a provider, empty when absent or not an object.
    pub fn credentials_for(&self, provider: &str) -> CredentialBundle {
        self.secrets
            .as_ref()
            .and_then(|s| s.get(provider))
            .map(CredentialBundle::from_secret)
            .unwrap_or_default()
    }
}

/// Possibly-incomplete provider credentials as stored on a channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialBundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

impl CredentialBundle {
    pub fn new(
        api_key: impl Into<String>,
        account_id: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            api_key: Some(api_key.into()),
            account_id: Some(account_id.into()),
            client_id: Some(client_id.into()),
        }
    }

    /// Read a bundle from a raw secret value. Non-string fields count as missing.
    pub fn from_secret(secret: &Value) -> Self {
        let field = |name: &str| {
            secret
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        Self {
            api_key: field("apiKey"),
            account_id: field("accountId"),
            client_id: field("clientId"),
        }
    }

    /// Resolve into complete credentials. Returns None if any field is missing.
    pub fn resolve(&self) -> Option<Credentials> {
        Some(Credentials {
            api_key: present(&self.api_key)?.to_string(),
            account_id: present(&self.account_id)?.to_string(),
            client_id: present(&self.client_id)?.to_string(),
        })
    }

    /// Wire names of the fields that are missing or empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if present(&self.api_key).is_none() {
            missing.push("apiKey");
        }
        if present(&self.account_id).is_none() {
            missing.push("accountId");
        }
        if present(&self.client_id).is_none() {
            missing.push("clientId");
        }
        missing
    }
}

/// Fully-resolved provider credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub api_key: String,
    pub account_id: String,
    pub client_id: String,
}

// ---------------------------------------------------------------
// Request spec
// ---------------------------------------------------------------

/// Shell of a provider object (event or video), identified by `id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResourceRef {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            extra: Map::new(),
        }
    }
}

/// The caller's request descriptor.
///
/// Fields other than `event` and `video` are kept so the transform sees the
/// caller's full spec.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<ResourceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<ResourceRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Spec {
    pub fn new(event_id: impl Into<String>, video_id: impl Into<String>) -> Self {
        Self {
            event: Some(ResourceRef::with_id(event_id)),
            video: Some(ResourceRef::with_id(video_id)),
            extra: Map::new(),
        }
    }

    pub fn event_id(&self) -> Option<&str> {
        self.event.as_ref().and_then(|e| present(&e.id))
    }

    pub fn video_id(&self) -> Option<&str> {
        self.video.as_ref().and_then(|v| present(&v.id))
    }
}

/// Inbound handler arguments: `{channel, spec}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchArgs {
    pub channel: Channel,
    #[serde(default)]
    pub spec: Spec,
}

impl FetchArgs {
    pub fn new(channel: Channel, spec: Spec) -> Self {
        Self { channel, spec }
    }
}

// ---------------------------------------------------------------
// Provider call
// ---------------------------------------------------------------

/// Parameters for a single provider `get_video` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderParams {
    api_key: String,
    account_id: String,
    client_id: String,
    event_id: String,
    id: String,
}

impl ProviderParams {
    /// Build params from resolved credentials and validated ids.
    pub fn new(creds: Credentials, event_id: impl Into<String>, video_id: impl Into<String>) -> Self {
        Self {
            api_key: creds.api_key,
            account_id: creds.account_id,
            client_id: creds.client_id,
            event_id: event_id.into(),
            id: video_id.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    /// The video id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Credentials carried by these params.
    pub fn credentials(&self) -> Credentials {
        Credentials {
            api_key: self.api_key.clone(),
            account_id: self.account_id.clone(),
            client_id: self.client_id.clone(),
        }
    }
}

/// Raw provider payload for a video asset.
pub type VideoPayload = Map<String, Value>;

/// Provider payload with the signing credentials attached under `creds`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoResource {
    #[serde(flatten)]
    pub payload: VideoPayload,
    pub creds: Credentials,
}

impl VideoResource {
    /// Attach credentials to a payload. An existing `creds` key is replaced.
    pub fn new(mut payload: VideoPayload, creds: Credentials) -> Self {
        payload.remove("creds");
        Self { payload, creds }
    }

    /// Flatten into a single JSON object.
    pub fn into_value(self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

// ---------------------------------------------------------------
// Broadcasts
// ---------------------------------------------------------------

/// Severity tag of a broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Warn,
    Error,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Broadcast metadata (`{level}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastMeta {
    pub level: Level,
}

impl BroadcastMeta {
    pub fn warn() -> Self {
        Self { level: Level::Warn }
    }

    pub fn error() -> Self {
        Self { level: Level::Error }
    }
}

/// Broadcast body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BroadcastPayload {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<Spec>,
}

impl BroadcastPayload {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            spec: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_spec(mut self, spec: Spec) -> Self {
        self.spec = Some(spec);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bundle_resolves_when_complete() {
        let bundle = CredentialBundle::new("k", "a", "cl");
        let creds = bundle.resolve().unwrap();
        assert_eq!(creds.api_key, "k");
        assert_eq!(creds.account_id, "a");
        assert_eq!(creds.client_id, "cl");
        assert!(bundle.missing_fields().is_empty());
    }

    #[test]
    fn test_bundle_missing_or_empty_fields() {
        let bundle = CredentialBundle {
            api_key: Some("k".into()),
            account_id: Some(String::new()),
            client_id: None,
        };
        assert!(bundle.resolve().is_none());
        assert_eq!(bundle.missing_fields(), vec!["accountId", "clientId"]);
        assert_eq!(
            CredentialBundle::default().missing_fields(),
            vec!["apiKey", "accountId", "clientId"]
        );
    }

    #[test]
    fn test_channel_without_secrets_yields_empty_bundle() {
        let channel: Channel = serde_json::from_value(json!({"id": "c1"})).unwrap();
        assert_eq!(channel.credentials_for("livestream"), CredentialBundle::default());

        let channel: Channel =
            serde_json::from_value(json!({"id": "c2", "secrets": null})).unwrap();
        assert!(channel.credentials_for("livestream").resolve().is_none());
    }

    #[test]
    fn test_channel_reads_camel_case_secrets() {
        let channel: Channel = serde_json::from_value(json!({
            "id": "c1",
            "secrets": {
                "livestream": {"apiKey": "k", "accountId": "a", "clientId": "cl"},
                "other": {}
            }
        }))
        .unwrap();
        let creds = channel.credentials_for("livestream").resolve().unwrap();
        assert_eq!(creds.client_id, "cl");
        assert!(channel.credentials_for("other").resolve().is_none());
    }

    #[test]
    fn test_null_bundle_counts_as_missing() {
        let channel: Channel = serde_json::from_value(json!({
            "id": "c1",
            "secrets": {"livestream": null}
        }))
        .unwrap();
        let bundle = channel.credentials_for("livestream");
        assert_eq!(bundle, CredentialBundle::default());
        assert_eq!(bundle.missing_fields(), vec!["apiKey", "accountId", "clientId"]);
    }

    #[test]
    fn test_foreign_secrets_of_any_shape_are_ignored() {
        let channel: Channel = serde_json::from_value(json!({
            "id": "c1",
            "secrets": {
                "s3": "token",
                "jwplayer": [1, 2, 3],
                "livestream": {"apiKey": "k", "accountId": "a", "clientId": "cl"}
            }
        }))
        .unwrap();
        assert!(channel.credentials_for("livestream").resolve().is_some());
        assert!(channel.credentials_for("s3").resolve().is_none());
    }

    #[test]
    fn test_mistyped_credential_fields_count_as_missing() {
        let channel: Channel = serde_json::from_value(json!({
            "id": "c1",
            "secrets": {"livestream": {"apiKey": "k", "accountId": 42, "clientId": true}}
        }))
        .unwrap();
        let bundle = channel.credentials_for("livestream");
        assert_eq!(bundle.api_key.as_deref(), Some("k"));
        assert!(bundle.resolve().is_none());
        assert_eq!(bundle.missing_fields(), vec!["accountId", "clientId"]);
    }

    #[test]
    fn test_with_secrets_round_trips_through_raw_map() {
        let channel = Channel::new("c1")
            .with_secrets("livestream", CredentialBundle::new("k", "a", "cl"))
            .with_raw_secret("s3", json!("token"));
        assert_eq!(
            channel.credentials_for("livestream"),
            CredentialBundle::new("k", "a", "cl")
        );
        assert_eq!(channel.secrets.as_ref().unwrap()["s3"], "token");
    }

    #[test]
    fn test_spec_defaults_and_extra_fields() {
        let spec: Spec = serde_json::from_value(json!({})).unwrap();
        assert_eq!(spec.event_id(), None);
        assert_eq!(spec.video_id(), None);

        let raw = json!({
            "event": {"id": "e1", "title": "Finals"},
            "video": {"id": ""},
            "format": "hls"
        });
        let spec: Spec = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(spec.event_id(), Some("e1"));
        assert_eq!(spec.video_id(), None);
        assert_eq!(serde_json::to_value(&spec).unwrap(), raw);
    }

    #[test]
    fn test_provider_params_wire_shape() {
        let creds = CredentialBundle::new("k", "a", "cl").resolve().unwrap();
        let params = ProviderParams::new(creds.clone(), "e1", "v1");
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"apiKey": "k", "accountId": "a", "clientId": "cl", "eventId": "e1", "id": "v1"})
        );
        assert_eq!(params.credentials(), creds);
    }

    #[test]
    fn test_video_resource_replaces_existing_creds() {
        let creds = CredentialBundle::new("k", "a", "cl").resolve().unwrap();
        let payload = json!({"title": "Game 7", "creds": "stale"});
        let resource = VideoResource::new(payload.as_object().cloned().unwrap(), creds);
        let expected = json!({
            "title": "Game 7",
            "creds": {"apiKey": "k", "accountId": "a", "clientId": "cl"}
        });
        assert_eq!(serde_json::to_value(&resource).unwrap(), expected);
        assert_eq!(resource.into_value().unwrap(), expected);
    }

    #[test]
    fn test_broadcast_payload_skips_empty_fields() {
        let payload = BroadcastPayload::message("video not found").with_code(VIDEO_NOT_FOUND);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"message": "video not found", "code": "VIDEO_NOT_FOUND"})
        );
        assert_eq!(
            serde_json::to_value(BroadcastMeta::warn()).unwrap(),
            json!({"level": "warn"})
        );
    }
}
