use axum::extract::DefaultBodyLimit;
use axum::Router;
use crate::common::error::AppError;
use crate::state::AppState;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

/// Larger JSON bodies are rejected as `invalid_request_body`.
const MAX_BODY_BYTES: usize = 1024 * 1024;

pub async fn create_app(state: AppState) -> Router {
    crate::routes::configure_routes(state.clone())
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn route_not_found() -> AppError {
    AppError::RouteNotFound
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
