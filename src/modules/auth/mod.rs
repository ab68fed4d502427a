use axum::routing::post;
use axum::Router;
use crate::state::AppState;

pub mod dto;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;
pub mod token;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(handler::sign_up))
        .route("/login", post(handler::login))
}
