//! Request-level middleware: correlation ids, request logging, the CORS allow-list
//! and the hidden-file guard in front of the static directory.

use crate::errors::AppError;
use crate::handlers::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

const REQUEST_ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const REQUEST_ID_SUFFIX_LEN: usize = 6;

/// Generates a correlation id of the form `req_<unix-millis>_<6 lowercase alphanumerics>`.
pub fn generate_request_id() -> String {
    format!(
        "req_{}_{}",
        chrono::Utc::now().timestamp_millis(),
        request_id_suffix(uuid::Uuid::new_v4().as_u128())
    )
}

/// Base-36 digits of `entropy`, least significant first.
fn request_id_suffix(mut entropy: u128) -> String {
    (0..REQUEST_ID_SUFFIX_LEN)
        .map(|_| {
            let digit = REQUEST_ID_ALPHABET[(entropy % 36) as usize] as char;
            entropy /= 36;
            digit
        })
        .collect()
}

/// Echoes (or generates) `x-request-id` on every response and logs one
/// `http_request` event per request once the response is ready.
pub async fn request_context(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .filter(|v| v.to_str().is_ok_and(|s| !s.is_empty()))
        .cloned()
        .or_else(|| HeaderValue::from_str(&generate_request_id()).ok());

    let method = request.method().clone();
    let path = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let started_at = Instant::now();

    let mut response = next.run(request).await;

    if let Some(ref id) = request_id {
        response.headers_mut().insert(REQUEST_ID_HEADER, id.clone());
    }

    tracing::info!(
        event = "http_request",
        request_id = request_id.as_ref().and_then(|v| v.to_str().ok()),
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        duration_ms = started_at.elapsed().as_millis() as u64,
        origin = origin.as_deref(),
        "Request completed"
    );

    response
}

/// Rejects requests whose `Origin` is outside the allow-list with 403 `cors_blocked`
/// before they reach any route. Requests without an `Origin` header pass.
pub async fn cors_guard(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .map(|v| v.to_str().unwrap_or_default().to_string());

    match origin {
        Some(origin) if !state.config.is_origin_allowed(&origin) => {
            tracing::warn!(event = "cors_blocked", origin = %origin, "Origin not allowed");
            AppError::CorsBlocked(origin).into_response()
        }
        _ => next.run(request).await,
    }
}

/// Answers 404 for static paths with a dot-prefixed segment (`/.env`, `/.git/config`).
pub async fn hide_dotfiles(request: Request, next: Next) -> Response {
    if is_hidden_path(request.uri().path()) {
        tracing::warn!(
            event = "static_hidden",
            path = %request.uri().path(),
            "Hidden path requested"
        );
        return StatusCode::NOT_FOUND.into_response();
    }

    next.run(request).await
}

fn is_hidden_path(path: &str) -> bool {
    // ServeDir percent-decodes, so `%2e` is a dot too
    path.split('/').any(|segment| {
        segment.starts_with('.')
            || segment
                .get(..3)
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case("%2e"))
    })
}

/// CORS response headers for the allowed origins.
pub fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, REQUEST_ID_HEADER])
        .expose_headers([REQUEST_ID_HEADER])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_request_id_shape() {
        let id = generate_request_id();
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "req");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 6);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_request_id_suffix_uses_full_alphabet() {
        assert_eq!(request_id_suffix(0), "000000");
        assert_eq!(request_id_suffix(35), "z00000");
        assert_eq!(request_id_suffix(36 + 10), "a10000");

        // hex would never produce letters past 'f'
        let seen_past_f = (0..200).any(|_| {
            let id = generate_request_id();
            id.rsplit('_')
                .next()
                .is_some_and(|suffix| suffix.chars().any(|c| c > 'f'))
        });
        assert!(seen_past_f);
    }

    #[test]
    fn test_hidden_paths() {
        assert!(is_hidden_path("/.env"));
        assert!(is_hidden_path("/.git/config"));
        assert!(is_hidden_path("/assets/.secret"));
        assert!(is_hidden_path("/%2eenv"));
        assert!(is_hidden_path("/%2Eenv"));
        assert!(!is_hidden_path("/"));
        assert!(!is_hidden_path("/index.html"));
        assert!(!is_hidden_path("/assets/site.v2.css"));
    }

    #[test]
    fn test_generated_request_ids_differ() {
        assert_ne!(generate_request_id(), generate_request_id());
    }
}
