//! Wire types for server-pushed control directives and response envelopes.
//!
//! Responses may embed a `_controls` array instructing the client to update
//! one of its local caches, and a `_embedded` object of nested related
//! entities consumed directly by the caller (never cached).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Directive type that replaces (upserts into) a whole collection.
pub const REPLACE_COLLECTION: &str = "replace-collection";

/// Content type of error documents that surface directly to the user.
pub const ERROR_CONTENT_TYPE: &str = "application/vnd.error+json";

/// A server-emitted instruction to update a local cache.
///
/// Unrecognized `type` values parse fine and are ignored at application
/// time, so the server can introduce new directives without breaking old
/// clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Control {
    /// Directive type, e.g. `replace-collection`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Name of the target collection. Absent on bootstrap-style controls
    /// applied directly to a known cache.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,

    /// Raw entities carried by the directive.
    #[serde(default)]
    pub data: Vec<Value>,
}

impl Control {
    /// Build a `replace-collection` directive.
    #[must_use]
    pub fn replace_collection(collection: impl Into<String>, data: Vec<Value>) -> Self {
        Self {
            kind: REPLACE_COLLECTION.to_string(),
            collection: Some(collection.into()),
            data,
        }
    }

    /// Build a `replace-collection` directive with no target name, for
    /// applying a bootstrap payload directly to a chosen cache.
    #[must_use]
    pub fn replace_with(data: Vec<Value>) -> Self {
        Self {
            kind: REPLACE_COLLECTION.to_string(),
            collection: None,
            data,
        }
    }
}

/// One or many human-readable messages, as error documents carry them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageText {
    /// A single message.
    One(String),
    /// Several messages.
    Many(Vec<String>),
}

impl MessageText {
    /// Flatten into a list of messages.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        match self {
            MessageText::One(s) => vec![s],
            MessageText::Many(v) => v,
        }
    }
}

impl From<&str> for MessageText {
    fn from(s: &str) -> Self {
        MessageText::One(s.to_string())
    }
}

impl From<String> for MessageText {
    fn from(s: String) -> Self {
        MessageText::One(s)
    }
}

impl From<Vec<String>> for MessageText {
    fn from(v: Vec<String>) -> Self {
        MessageText::Many(v)
    }
}

/// Body of an `application/vnd.error+json` document.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDocument {
    /// The user-facing message(s).
    pub message: MessageText,
}

/// The recognized parts of a response body.
///
/// Everything else in the body stays in the raw JSON the caller receives;
/// this envelope only lifts out the cross-cutting fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseEnvelope {
    /// Control directives for the interceptor.
    #[serde(rename = "_controls", default)]
    pub controls: Vec<Control>,

    /// Nested related entities for the caller; never cached.
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<Value>,

    /// Optional server-supplied confirmation message.
    #[serde(default)]
    pub message: Option<String>,
}

impl ResponseEnvelope {
    /// Lift the envelope fields out of a raw response body.
    ///
    /// Non-object bodies produce an empty envelope.
    #[must_use]
    pub fn from_body(body: &Value) -> Self {
        serde_json::from_value(body.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_control_parses_replace_collection() {
        let control: Control = serde_json::from_value(json!({
            "type": "replace-collection",
            "collection": "circles",
            "data": [{"id": 1, "name": "A"}]
        }))
        .unwrap();

        assert_eq!(control.kind, REPLACE_COLLECTION);
        assert_eq!(control.collection.as_deref(), Some("circles"));
        assert_eq!(control.data.len(), 1);
    }

    #[test]
    fn test_control_parses_unknown_type() {
        let control: Control =
            serde_json::from_value(json!({"type": "invalidate-collection"})).unwrap();

        assert_eq!(control.kind, "invalidate-collection");
        assert!(control.data.is_empty());
    }

    #[test]
    fn test_envelope_lifts_controls_and_embedded() {
        let body = json!({
            "id": 3,
            "_controls": [{"type": "replace-collection", "collection": "circles", "data": []}],
            "_embedded": {"members": [{"account_id": 1}]},
            "message": "Saved"
        });

        let envelope = ResponseEnvelope::from_body(&body);
        assert_eq!(envelope.controls.len(), 1);
        assert!(envelope.embedded.is_some());
        assert_eq!(envelope.message.as_deref(), Some("Saved"));
    }

    #[test]
    fn test_envelope_of_plain_body_is_empty() {
        let envelope = ResponseEnvelope::from_body(&json!([1, 2, 3]));
        assert!(envelope.controls.is_empty());
        assert!(envelope.embedded.is_none());
    }

    #[test]
    fn test_message_text_single_or_many() {
        let one: MessageText = serde_json::from_value(json!("Bad username")).unwrap();
        assert_eq!(one.into_vec(), vec!["Bad username"]);

        let many: MessageText = serde_json::from_value(json!(["a", "b"])).unwrap();
        assert_eq!(many.into_vec(), vec!["a", "b"]);
    }
}
