use crate::handlers::{self, AppState};
use crate::middleware::{build_cors_layer, cors_guard, hide_dotfiles, request_context};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, services::ServeDir, trace::TraceLayer};

/// Largest accepted request body. A lead is two small fields.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Builds the full application router.
///
/// Layer order, outermost first: request id + request log, tracing, CORS
/// allow-list guard, CORS headers, body limit. Anything not matched by an API
/// route is served from the static directory, minus dot-prefixed paths.
pub fn build_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/lead", post(handlers::submit_lead))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES));

    let static_files = ServiceBuilder::new()
        .layer(middleware::from_fn(hide_dotfiles))
        .service(ServeDir::new(&state.config.static_dir));

    Router::new()
        .merge(api_routes)
        .fallback_service(static_files)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_context))
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn_with_state(state.clone(), cors_guard))
                .layer(build_cors_layer(&state.config.allowed_origins)),
        )
        .with_state(state)
}
