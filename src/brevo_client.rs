use crate::errors::AppError;
use reqwest::StatusCode;
use serde_json::json;
use std::fmt;

/// Successful outcomes of a contact submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactStatus {
    /// Brevo stored the contact (any 2xx).
    Created,
    /// The contact already existed on the list (409).
    Duplicate,
}

/// Failed outcomes of a contact submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrevoError {
    /// Brevo answered with a status other than 2xx or 409.
    Rejected { status: u16 },
    /// The request never got an HTTP answer.
    Unreachable(String),
}

impl fmt::Display for BrevoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrevoError::Rejected { status } => write!(f, "Brevo returned {}", status),
            BrevoError::Unreachable(msg) => write!(f, "Brevo request failed: {}", msg),
        }
    }
}

impl std::error::Error for BrevoError {}

impl From<BrevoError> for AppError {
    fn from(err: BrevoError) -> Self {
        match err {
            BrevoError::Rejected { status } => AppError::UpstreamRejected(status),
            BrevoError::Unreachable(msg) => AppError::UpstreamUnreachable(msg),
        }
    }
}

/// Client for the Brevo contacts API.
#[derive(Clone)]
pub struct BrevoClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for BrevoClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrevoClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl BrevoClient {
    /// Creates a new `BrevoClient`.
    ///
    /// No request timeout is set; a slow upstream holds the calling request open
    /// until the transport gives up.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The Brevo API base URL, e.g. `https://api.brevo.com/v3`.
    /// * `api_key` - Value sent in the `api-key` header.
    pub fn new(base_url: String, api_key: String) -> Result<Self, AppError> {
        let client = reqwest::Client::builder().build().map_err(|e| {
            AppError::InternalError(format!("Failed to create Brevo client: {}", e))
        })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Adds (or updates) a contact on a list.
    ///
    /// Performs exactly one `POST {base_url}/contacts`. Nothing is retried.
    ///
    /// # Arguments
    ///
    /// * `email` - The contact's email address.
    /// * `list_id` - Destination list.
    ///
    /// # Returns
    ///
    /// * `Result<ContactStatus, BrevoError>` - `Created` or `Duplicate`, or why it failed.
    pub async fn submit(&self, email: &str, list_id: i64) -> Result<ContactStatus, BrevoError> {
        let url = format!("{}/contacts", self.base_url);
        tracing::debug!("Submitting contact to Brevo list {}: {}", list_id, url);

        let body = json!({
            "email": email,
            "listIds": [list_id],
            "updateEnabled": true,
        });

        let response = self
            .client
            .post(&url)
            .header("api-key", &self.api_key)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| BrevoError::Unreachable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(ContactStatus::Created);
        }
        if status == StatusCode::CONFLICT {
            return Ok(ContactStatus::Duplicate);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        tracing::debug!("Brevo returned {}: {}", status, error_text);

        Err(BrevoError::Rejected {
            status: status.as_u16(),
        })
    }
}
