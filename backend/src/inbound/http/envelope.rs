//! Success envelope shared by every JSON endpoint.

use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const SUCCESS_STATUS: &str = "success";

/// `{"status":"success", "payload"?, "message"?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SuccessEnvelope<T> {
    /// Always `"success"`.
    #[schema(example = "success")]
    pub status: String,
    /// Result data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,
    /// Human-readable outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> SuccessEnvelope<T> {
    /// Envelope carrying `payload`.
    pub fn payload(payload: T) -> Self {
        Self {
            status: SUCCESS_STATUS.to_owned(),
            payload: Some(payload),
            message: None,
        }
    }

    /// Attach a message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl SuccessEnvelope<()> {
    /// Envelope carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: SUCCESS_STATUS.to_owned(),
            payload: None,
            message: Some(message.into()),
        }
    }
}

impl<T: Serialize> SuccessEnvelope<T> {
    /// `200 OK` with this envelope as the JSON body.
    pub fn into_response(self) -> HttpResponse {
        HttpResponse::Ok().json(self)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn message_envelopes_omit_payload() {
        let body = serde_json::to_value(SuccessEnvelope::message("pet deleted")).expect("json");
        assert_eq!(body, json!({ "status": "success", "message": "pet deleted" }));
    }

    #[test]
    fn payload_envelopes_omit_message_unless_set() {
        let plain = serde_json::to_value(SuccessEnvelope::payload(vec![1, 2])).expect("json");
        assert_eq!(plain, json!({ "status": "success", "payload": [1, 2] }));

        let annotated =
            serde_json::to_value(SuccessEnvelope::payload("id").with_message("Registered"))
                .expect("json");
        assert_eq!(
            annotated,
            json!({ "status": "success", "payload": "id", "message": "Registered" })
        );
    }
}
