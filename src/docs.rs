use utoipa::OpenApi;
use crate::common::error::{FieldError, ValidationBody};
use crate::common::pagination::PaginationMeta;
use crate::common::response::Status;
use crate::modules::auth::dto::{LoginRequest, SignUpRequest, TokenResponse, UserResponse};
use crate::modules::auth::model::Role;
use crate::modules::movie::dto::{CreateMovieRequest, MovieResponse, UpdateMovieRequest};
use crate::modules::movie::model::Movie;
use crate::modules::star::dto::{CreateStarRequest, StarResponse, UpdateStarRequest};
use crate::modules::star::model::{Sex, Star};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::handler::sign_up,
        crate::modules::auth::handler::login,
        crate::modules::movie::handler::list_movies,
        crate::modules::movie::handler::create_movie,
        crate::modules::movie::handler::get_movie,
        crate::modules::movie::handler::update_movie,
        crate::modules::movie::handler::delete_movie,
        crate::modules::star::handler::list_stars,
        crate::modules::star::handler::create_star,
        crate::modules::star::handler::get_star,
        crate::modules::star::handler::update_star,
        crate::modules::star::handler::delete_star,
    ),
    components(
        schemas(
            SignUpRequest, LoginRequest, TokenResponse, UserResponse, Role,
            CreateMovieRequest, UpdateMovieRequest, MovieResponse, Movie,
            CreateStarRequest, UpdateStarRequest, StarResponse, Star, Sex,
            Status, PaginationMeta, FieldError, ValidationBody,
        )
    ),
    tags(
        (name = "Auth", description = "Sign-up and login"),
        (name = "Movies", description = "Movie catalog"),
        (name = "Stars", description = "Star catalog")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

use utoipa::Modify;
use utoipa::openapi::security::{SecurityScheme, HttpAuthScheme, HttpBuilder};

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_catalog_route() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for path in [
            "/api/v1/auth/signup",
            "/api/v1/auth/login",
            "/api/v1/filmoteka/movies",
            "/api/v1/filmoteka/movie/{id}",
            "/api/v1/filmoteka/stars",
            "/api/v1/filmoteka/star/{id}",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn registers_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
