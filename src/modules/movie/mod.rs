use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use crate::state::AppState;

pub mod dto;
pub mod handler;
pub mod model;
pub mod query;
pub mod repository;
pub mod service;

pub fn router(state: AppState) -> Router<AppState> {
    let read_routes = Router::new()
        .route("/movies", get(handler::list_movies))
        .route("/movie/{id}", get(handler::get_movie))
        .route_layer(middleware::from_fn(crate::middleware::role::reader_guard))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::auth::auth_middleware,
        ));

    let admin_routes = Router::new()
        .route("/movies", post(handler::create_movie))
        .route(
            "/movie/{id}",
            axum::routing::patch(handler::update_movie).delete(handler::delete_movie),
        )
        .route_layer(middleware::from_fn(crate::middleware::role::admin_guard))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware,
        ));

    read_routes.merge(admin_routes)
}
