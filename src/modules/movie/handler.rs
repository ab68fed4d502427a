use super::dto::{CreateMovieRequest, ListMoviesQuery, MovieResponse, UpdateMovieRequest};
use super::model::Movie;
use super::service::MovieService;
use crate::common::codes;
use crate::common::error::AppError;
use crate::common::response::{ApiResponse, ApiSuccess};
use crate::common::validation::{EntityId, ValidatedJson, ValidatedQuery};
use crate::modules::auth::model::Identity;
use crate::state::AppState;
use axum::{
    extract::{Extension, State},
    http::StatusCode,
};
use tracing::info;

/// List movies
///
/// Searches titles and star names, sorted by `rating,desc` unless told
/// otherwise. An unknown sort field falls back to the default.
#[utoipa::path(
    get,
    path = "/api/v1/filmoteka/movies",
    params(ListMoviesQuery),
    responses(
        (status = 200, description = "Page of live movies", body = ApiResponse<Vec<Movie>>),
        (status = 400, description = "Malformed query string"),
        (status = 401, description = "Missing or invalid token"),
        (status = 422, description = "Validation error")
    ),
    tag = "Movies",
    security(("bearer_auth" = []))
)]
pub async fn list_movies(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListMoviesQuery>,
) -> Result<ApiSuccess<ApiResponse<Vec<Movie>>>, AppError> {
    let (movies, meta) = MovieService::list(state, query).await?;

    Ok(ApiSuccess(
        ApiResponse::paginated(movies, meta, codes::MOVIES_RECEIVED),
        StatusCode::OK,
    ))
}

/// Create a movie with its stars
#[utoipa::path(
    post,
    path = "/api/v1/filmoteka/movies",
    request_body = CreateMovieRequest,
    responses(
        (status = 201, description = "Movie created", body = ApiResponse<MovieResponse>),
        (status = 400, description = "Malformed body"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "A star does not exist"),
        (status = 422, description = "Validation error")
    ),
    tag = "Movies",
    security(("bearer_auth" = []))
)]
pub async fn create_movie(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    ValidatedJson(payload): ValidatedJson<CreateMovieRequest>,
) -> Result<ApiSuccess<ApiResponse<MovieResponse>>, AppError> {
    let created = MovieService::create(state, payload).await?;
    info!(
        movie_id = created.movie.id,
        stars = created.stars.len(),
        actor = %identity.username,
        "movie created"
    );

    Ok(ApiSuccess(
        ApiResponse::success(created, codes::MOVIE_CREATED),
        StatusCode::CREATED,
    ))
}

/// Get a movie with its stars
#[utoipa::path(
    get,
    path = "/api/v1/filmoteka/movie/{id}",
    params(
        ("id" = i64, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Movie details", body = ApiResponse<MovieResponse>),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Movie not found")
    ),
    tag = "Movies",
    security(("bearer_auth" = []))
)]
pub async fn get_movie(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<ApiSuccess<ApiResponse<MovieResponse>>, AppError> {
    let movie = MovieService::find_by_id(state, id).await?;

    Ok(ApiSuccess(ApiResponse::success(movie, codes::MOVIE_RECEIVED), StatusCode::OK))
}

/// Update a movie
#[utoipa::path(
    patch,
    path = "/api/v1/filmoteka/movie/{id}",
    params(
        ("id" = i64, Path, description = "Movie ID")
    ),
    request_body = UpdateMovieRequest,
    responses(
        (status = 200, description = "Movie updated", body = ApiResponse<MovieResponse>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Movie or star not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Movies",
    security(("bearer_auth" = []))
)]
pub async fn update_movie(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    EntityId(id): EntityId,
    ValidatedJson(payload): ValidatedJson<UpdateMovieRequest>,
) -> Result<ApiSuccess<ApiResponse<MovieResponse>>, AppError> {
    let replaces_stars = payload.stars_id.as_ref().is_some_and(|ids| !ids.is_empty());
    let updated = MovieService::update(state, id, payload).await?;
    info!(movie_id = id, replaces_stars, actor = %identity.username, "movie updated");

    Ok(ApiSuccess(ApiResponse::success(updated, codes::MOVIE_UPDATED), StatusCode::OK))
}

/// Soft-delete a movie
#[utoipa::path(
    delete,
    path = "/api/v1/filmoteka/movie/{id}",
    params(
        ("id" = i64, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Movie deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Movie not found or already deleted")
    ),
    tag = "Movies",
    security(("bearer_auth" = []))
)]
pub async fn delete_movie(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    EntityId(id): EntityId,
) -> Result<ApiSuccess<ApiResponse<()>>, AppError> {
    MovieService::delete(state, id).await?;
    info!(movie_id = id, actor = %identity.username, "movie deleted");

    Ok(ApiSuccess(ApiResponse::empty(codes::MOVIE_DELETED), StatusCode::OK))
}
