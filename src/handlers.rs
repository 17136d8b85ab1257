use crate::brevo_client::{BrevoClient, BrevoError, ContactStatus};
use crate::config::Config;
use crate::errors::AppError;
use crate::models::{HealthResponse, LeadAccepted, LeadSubmission};
use crate::validation::{email_field, has_consent};
use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Client for the Brevo contacts API. `None` when credentials are missing.
    pub brevo_client: Option<BrevoClient>,
}

impl AppState {
    /// Builds the state, creating the Brevo client only if credentials are usable.
    pub fn new(config: Config) -> Self {
        let brevo_client = match config.brevo_credentials() {
            Some(creds) => {
                match BrevoClient::new(config.brevo_base_url.clone(), creds.api_key.to_string()) {
                    Ok(client) => {
                        tracing::info!("✓ Brevo client initialized: {}", config.brevo_base_url);
                        Some(client)
                    }
                    Err(e) => {
                        tracing::error!("Failed to initialize Brevo client: {}", e);
                        None
                    }
                }
            }
            None => {
                tracing::warn!(
                    "BREVO_API_KEY or BREVO_LIST_ID missing; lead submissions will fail until configured"
                );
                None
            }
        };

        Self {
            config,
            brevo_client,
        }
    }
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<HealthResponse>) {
    (StatusCode::OK, Json(HealthResponse { ok: true }))
}

/// POST /api/lead
///
/// Flow:
/// 1. Validate the email (400 `invalid_email`).
/// 2. Require `consent: true` (400 `consent_required`).
/// 3. Require Brevo credentials (500 `server_misconfigured`).
/// 4. Submit the contact to Brevo once: 2xx is saved, 409 is a duplicate (still a
///    success), any other status is `brevo_error` and a transport failure is
///    `brevo_unreachable` (both 502).
///
/// The body is read raw so that a missing or malformed body is reported as a
/// validation failure (400 `invalid_email`) instead of an extractor rejection or
/// a generic 500 `server_error`: an unparseable body carries no usable email.
pub async fn submit_lead(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<LeadAccepted, AppError> {
    let lead = LeadSubmission::from_body(&body);

    let Some(email) = email_field(&lead.email) else {
        tracing::warn!(
            event = "lead_rejected",
            reason = "invalid_email",
            email = lead.email.as_str(),
            "Lead rejected"
        );
        return Err(AppError::InvalidEmail);
    };

    if !has_consent(&lead.consent) {
        tracing::warn!(
            event = "lead_rejected",
            reason = "consent_required",
            "Lead rejected"
        );
        return Err(AppError::ConsentRequired);
    }

    let (client, list_id) = match (&state.brevo_client, state.config.brevo_credentials()) {
        (Some(client), Some(creds)) => (client, creds.list_id),
        _ => {
            tracing::error!(
                event = "config_missing",
                has_api_key = state.config.brevo_api_key.is_some(),
                has_list_id = state.config.brevo_list_id.is_some(),
                "Brevo configuration missing"
            );
            return Err(AppError::ServerMisconfigured);
        }
    };

    match client.submit(email, list_id).await {
        Ok(ContactStatus::Created) => {
            tracing::info!(event = "lead_saved", email, list_id, "Lead saved");
            Ok(LeadAccepted::Saved)
        }
        Ok(ContactStatus::Duplicate) => {
            tracing::info!(event = "lead_duplicate", email, list_id, "Lead already on list");
            Ok(LeadAccepted::Duplicate)
        }
        Err(BrevoError::Rejected { status }) => {
            tracing::error!(event = "brevo_error", status, "Brevo rejected lead");
            Err(AppError::UpstreamRejected(status))
        }
        Err(err @ BrevoError::Unreachable(_)) => {
            tracing::error!(event = "brevo_unreachable", error = %err, "Brevo unreachable");
            Err(err.into())
        }
    }
}
