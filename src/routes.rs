use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use crate::docs::ApiDoc;
use axum::Router;
use crate::state::AppState;

use tower_http::cors::{Any, CorsLayer};

pub fn configure_routes(state: AppState) -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(health_routes())
        .nest("/api/v1/auth", crate::modules::auth::router())
        .nest("/api/v1/filmoteka", filmoteka_routes(state))
        .layer(cors)
}

fn filmoteka_routes(state: AppState) -> Router<AppState> {
    crate::modules::movie::router(state.clone()).merge(crate::modules::star::router(state))
}

fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", axum::routing::get(|| async { "ok" }))
}
