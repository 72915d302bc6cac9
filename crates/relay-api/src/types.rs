//! Request and response bodies.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RelayError;

/// An inbound delivery or order submission.
///
/// The body is kept as a loose JSON document: no field is required and no
/// type is enforced. Renderers read what is there and substitute placeholders
/// for what is not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Submission(Value);

impl Submission {
    /// Wraps an already-parsed document.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Decodes a submission from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes).map(Self)
    }

    /// Looks up a top-level field. Non-object documents have no fields.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.as_object().and_then(|fields| fields.get(key))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// Reads the body as JSON regardless of `Content-Type`.
///
/// A body that cannot be read keeps axum's rejection status. A body that is
/// not JSON is an unexpected failure.
#[async_trait]
impl<S> FromRequest<S> for Submission
where
    S: Send + Sync,
{
    type Rejection = RelayError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| RelayError::http(rejection.status(), rejection.body_text()))?;

        Submission::from_slice(&bytes)
            .map_err(|e| RelayError::unexpected(format!("Malformed JSON in request body: {}", e)))
    }
}

/// Liveness response for `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: bool,
}

/// Acknowledgement returned once a notification has been handed off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub status: String,
}

impl AckResponse {
    pub fn success() -> Self {
        Self {
            status: "Success".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_submission_fields() {
        let submission = Submission::from_slice(br#"{"name":"Ann","phone":"+7 900"}"#).unwrap();
        assert_eq!(submission.field("name"), Some(&json!("Ann")));
        assert_eq!(submission.field("phone"), Some(&json!("+7 900")));
        assert_eq!(submission.field("amount"), None);
    }

    #[test]
    fn test_submission_non_object_has_no_fields() {
        let submission = Submission::from_slice(b"[1, 2]").unwrap();
        assert_eq!(submission.field("name"), None);

        let submission = Submission::from_slice(b"\"text\"").unwrap();
        assert_eq!(submission.field("name"), None);
    }

    #[test]
    fn test_submission_malformed() {
        assert!(Submission::from_slice(b"name=Ann").is_err());
        assert!(Submission::from_slice(b"").is_err());
    }

    #[test]
    fn test_submission_preserves_key_order() {
        let raw = r#"{"phone":"1","name":"Ann","items":{"b":1,"a":2}}"#;
        let submission = Submission::from_slice(raw.as_bytes()).unwrap();
        assert_eq!(serde_json::to_string(&submission).unwrap(), raw);
    }

    #[test]
    fn test_ack_response_serialization() {
        let body = serde_json::to_value(AckResponse::success()).unwrap();
        assert_eq!(body, json!({ "status": "Success" }));

        let body = serde_json::to_value(HealthResponse { status: true }).unwrap();
        assert_eq!(body, json!({ "status": true }));
    }
}
