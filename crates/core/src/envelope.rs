//! Uniform response envelope.
//!
//! Every gateway response body has the shape
//!
//! ```json
//! { "status": "success" | "error", "payload": { "code": "...", "message": "...", ... } }
//! ```
//!
//! `payload.code` is a stable machine-readable identifier; `payload.message`
//! is human-readable and optional. Domain fields live next to `code` inside the
//! payload, and a few responses (repository listings) also carry top-level
//! fields such as `pageLinks`. The HTTP status is attached by the caller.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const RESERVED_PAYLOAD_KEYS: [&str; 2] = ["code", "message"];
const RESERVED_TOP_LEVEL_KEYS: [&str; 2] = ["status", "payload"];

/// Outcome marker of an envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Envelope payload: a code, an optional message, and domain fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A response body in the canonical shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub status: Status,
    pub payload: Payload,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Envelope {
    /// Successful envelope with the given code.
    pub fn success(code: impl Into<String>) -> Self {
        Self::new(Status::Success, code.into(), None)
    }

    /// Error envelope with a code and a human-readable message.
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Status::Error, code.into(), Some(message.into()))
    }

    fn new(status: Status, code: String, message: Option<String>) -> Self {
        Self {
            status,
            payload: Payload {
                code,
                message,
                fields: Map::new(),
            },
            extra: Map::new(),
        }
    }

    /// Attach a domain field to the payload.
    ///
    /// `code` and `message` are owned by the envelope itself; a field with
    /// either name is ignored.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        let key = key.into();
        if !RESERVED_PAYLOAD_KEYS.contains(&key.as_str()) {
            self.payload.fields.insert(key, value);
        }
        self
    }

    /// Serialize `value` and attach it as a payload field.
    pub fn with_serialized<T: Serialize + ?Sized>(
        self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<Self> {
        let value = serde_json::to_value(value)?;
        Ok(self.with_field(key, value))
    }

    /// Attach a field next to `status` and `payload`.
    ///
    /// A field named `status` or `payload` is ignored.
    pub fn with_top_level(mut self, key: impl Into<String>, value: Value) -> Self {
        let key = key.into();
        if !RESERVED_TOP_LEVEL_KEYS.contains(&key.as_str()) {
            self.extra.insert(key, value);
        }
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    pub fn code(&self) -> &str {
        &self.payload.code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_shape() {
        let envelope = Envelope::success("github-user").with_field("user", json!({"id": 1}));

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "status": "success",
                "payload": { "code": "github-user", "user": { "id": 1 } }
            })
        );
    }

    #[test]
    fn test_error_shape_includes_message() {
        let envelope = Envelope::error("github-user-error", "Not Found");

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "status": "error",
                "payload": { "code": "github-user-error", "message": "Not Found" }
            })
        );
        assert!(!envelope.is_success());
    }

    #[test]
    fn test_top_level_fields_sit_beside_payload() {
        let envelope = Envelope::success("github-list-repositories")
            .with_field("repos", json!([]))
            .with_top_level("pageLinks", json!({ "next": 2 }));

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["pageLinks"], json!({ "next": 2 }));
        assert_eq!(value["payload"]["repos"], json!([]));
    }

    #[test]
    fn test_reserved_keys_are_ignored() {
        let envelope = Envelope::error("github-user-error", "Not Found")
            .with_field("code", json!("forged"))
            .with_field("message", json!("forged"))
            .with_top_level("status", json!("success"))
            .with_top_level("payload", json!({}));

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "status": "error",
                "payload": { "code": "github-user-error", "message": "Not Found" }
            })
        );
    }

    #[test]
    fn test_deserializes_back_into_parts() {
        let envelope: Envelope = serde_json::from_value(json!({
            "status": "success",
            "payload": { "code": "github-user", "user": { "login": "johndoe" } },
            "pageLinks": {}
        }))
        .unwrap();

        assert!(envelope.is_success());
        assert_eq!(envelope.code(), "github-user");
        assert_eq!(envelope.payload.message, None);
        assert_eq!(envelope.payload.fields["user"]["login"], "johndoe");
        assert_eq!(envelope.extra["pageLinks"], json!({}));
    }

    #[test]
    fn test_with_serialized() {
        #[derive(Serialize)]
        struct Thing {
            name: Option<String>,
        }

        let envelope = Envelope::success("ok")
            .with_serialized("thing", &Thing { name: None })
            .unwrap();
        assert_eq!(envelope.payload.fields["thing"], json!({ "name": null }));
    }
}
