use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/lead`.
///
/// Fields stay untyped: a wrong type is a validation outcome, not a parse failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LeadSubmission {
    #[serde(default)]
    pub email: Value,
    #[serde(default)]
    pub consent: Value,
}

impl LeadSubmission {
    /// Reads a submission from raw body bytes.
    ///
    /// Anything that is not a JSON object (empty body, malformed JSON, an array...)
    /// becomes an empty submission and is rejected later by validation.
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(value @ Value::Object(_)) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }
}

/// Successful lead outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadAccepted {
    Saved,
    /// The address was already on the list. Reported with HTTP 409 but `ok: true`.
    Duplicate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeadResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub duplicate: bool,
}

impl IntoResponse for LeadAccepted {
    fn into_response(self) -> Response {
        match self {
            LeadAccepted::Saved => (
                StatusCode::OK,
                Json(LeadResponse {
                    ok: true,
                    duplicate: false,
                }),
            )
                .into_response(),
            LeadAccepted::Duplicate => (
                StatusCode::CONFLICT,
                Json(LeadResponse {
                    ok: true,
                    duplicate: true,
                }),
            )
                .into_response(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_body_object() {
        let lead = LeadSubmission::from_body(br#"{"email":"a@b.co","consent":true}"#);
        assert_eq!(lead.email, json!("a@b.co"));
        assert_eq!(lead.consent, json!(true));
    }

    #[test]
    fn test_from_body_tolerates_garbage() {
        for body in [&b""[..], b"not json", b"[1,2]", b"null", b"\"a@b.co\""] {
            let lead = LeadSubmission::from_body(body);
            assert_eq!(lead.email, Value::Null);
            assert_eq!(lead.consent, Value::Null);
        }
    }

    #[test]
    fn test_from_body_missing_fields() {
        let lead = LeadSubmission::from_body(br#"{"email":"a@b.co"}"#);
        assert_eq!(lead.consent, Value::Null);
    }

    #[test]
    fn test_response_serialization() {
        let saved = LeadResponse {
            ok: true,
            duplicate: false,
        };
        assert_eq!(serde_json::to_value(&saved).unwrap(), json!({"ok": true}));

        let duplicate = LeadResponse {
            ok: true,
            duplicate: true,
        };
        assert_eq!(
            serde_json::to_value(&duplicate).unwrap(),
            json!({"ok": true, "duplicate": true})
        );
    }
}
