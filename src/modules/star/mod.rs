use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use crate::state::AppState;

pub mod dto;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub fn router(state: AppState) -> Router<AppState> {
    let read_routes = Router::new()
        .route("/stars", get(handler::list_stars))
        .route("/star/{id}", get(handler::get_star))
        .route_layer(middleware::from_fn(crate::middleware::role::reader_guard))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::auth::auth_middleware,
        ));

    let admin_routes = Router::new()
        .route("/stars", post(handler::create_star))
        .route(
            "/star/{id}",
            axum::routing::patch(handler::update_star).delete(handler::delete_star),
        )
        .route_layer(middleware::from_fn(crate::middleware::role::admin_guard))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware,
        ));

    read_routes.merge(admin_routes)
}
