use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Application-specific error types.
///
/// Every variant maps to a stable error code in the `{ "ok": false, "error": <code> }`
/// response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// The submitted email failed validation.
    InvalidEmail,
    /// The submission did not carry `consent: true`.
    ConsentRequired,
    /// Brevo credentials are missing or malformed.
    ServerMisconfigured,
    /// Brevo answered with a non-success, non-conflict status.
    UpstreamRejected(u16),
    /// Brevo could not be reached at all.
    UpstreamUnreachable(String),
    /// The request came from an origin outside the allow-list.
    CorsBlocked(String),
    /// Internal server error.
    InternalError(String),
}

impl AppError {
    /// Stable machine-readable code sent to the caller.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidEmail => "invalid_email",
            AppError::ConsentRequired => "consent_required",
            AppError::ServerMisconfigured => "server_misconfigured",
            AppError::UpstreamRejected(_) => "brevo_error",
            AppError::UpstreamUnreachable(_) => "brevo_unreachable",
            AppError::CorsBlocked(_) => "cors_blocked",
            AppError::InternalError(_) => "server_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidEmail | AppError::ConsentRequired => StatusCode::BAD_REQUEST,
            AppError::ServerMisconfigured | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::UpstreamRejected(_) | AppError::UpstreamUnreachable(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::CorsBlocked(_) => StatusCode::FORBIDDEN,
        }
    }
}

impl fmt::Display for AppError {
    /// Formats the error for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidEmail => write!(f, "Invalid email"),
            AppError::ConsentRequired => write!(f, "Consent required"),
            AppError::ServerMisconfigured => write!(f, "Server misconfigured"),
            AppError::UpstreamRejected(status) => write!(f, "Brevo returned status {}", status),
            AppError::UpstreamUnreachable(msg) => write!(f, "Brevo unreachable: {}", msg),
            AppError::CorsBlocked(origin) => write!(f, "Origin not allowed: {}", origin),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response.
    ///
    /// The structured `event` logs for each branch are emitted where the decision is
    /// made; only internal errors, which have no other log site, are logged here.
    fn into_response(self) -> Response {
        if let AppError::InternalError(msg) = &self {
            tracing::error!(event = "unhandled_error", message = %msg, "Internal error");
        }

        let body = Json(json!({
            "ok": false,
            "error": self.code(),
        }));

        (self.status(), body).into_response()
    }
}
