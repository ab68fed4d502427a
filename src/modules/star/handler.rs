use super::dto::{CreateStarRequest, ListStarsQuery, StarResponse, UpdateStarRequest};
use super::model::Star;
use super::service::StarService;
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

/// List stars
#[utoipa::path(
    get,
    path = "/api/v1/filmoteka/stars",
    params(ListStarsQuery),
    responses(
        (status = 200, description = "Page of live stars, newest first", body = ApiResponse<Vec<Star>>),
        (status = 401, description = "Missing or invalid token"),
        (status = 422, description = "Validation error")
    ),
    tag = "Stars",
    security(("bearer_auth" = []))
)]
pub async fn list_stars(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListStarsQuery>,
) -> Result<ApiSuccess<ApiResponse<Vec<Star>>>, AppError> {
    let (stars, meta) = StarService::list(state, query).await?;

    Ok(ApiSuccess(
        ApiResponse::paginated(stars, meta, codes::STARS_RECEIVED),
        StatusCode::OK,
    ))
}

/// Create a star
#[utoipa::path(
    post,
    path = "/api/v1/filmoteka/stars",
    request_body = CreateStarRequest,
    responses(
        (status = 201, description = "Star created", body = ApiResponse<Star>),
        (status = 400, description = "Malformed body"),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "Validation error")
    ),
    tag = "Stars",
    security(("bearer_auth" = []))
)]
pub async fn create_star(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    ValidatedJson(payload): ValidatedJson<CreateStarRequest>,
) -> Result<ApiSuccess<ApiResponse<Star>>, AppError> {
    let star = StarService::create(state, payload).await?;
    info!(star_id = star.id, actor = %identity.username, "star created");

    Ok(ApiSuccess(ApiResponse::success(star, codes::STAR_CREATED), StatusCode::CREATED))
}

/// Get a star with its movies
#[utoipa::path(
    get,
    path = "/api/v1/filmoteka/star/{id}",
    params(
        ("id" = i64, Path, description = "Star ID")
    ),
    responses(
        (status = 200, description = "Star details", body = ApiResponse<StarResponse>),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Star not found")
    ),
    tag = "Stars",
    security(("bearer_auth" = []))
)]
pub async fn get_star(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<ApiSuccess<ApiResponse<StarResponse>>, AppError> {
    let star = StarService::find_by_id(state, id).await?;

    Ok(ApiSuccess(ApiResponse::success(star, codes::STAR_RECEIVED), StatusCode::OK))
}

/// Update a star
#[utoipa::path(
    patch,
    path = "/api/v1/filmoteka/star/{id}",
    params(
        ("id" = i64, Path, description = "Star ID")
    ),
    request_body = UpdateStarRequest,
    responses(
        (status = 200, description = "Star updated", body = ApiResponse<StarResponse>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Star not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Stars",
    security(("bearer_auth" = []))
)]
pub async fn update_star(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    EntityId(id): EntityId,
    ValidatedJson(payload): ValidatedJson<UpdateStarRequest>,
) -> Result<ApiSuccess<ApiResponse<StarResponse>>, AppError> {
    let star = StarService::update(state, id, payload).await?;
    info!(star_id = id, actor = %identity.username, "star updated");

    Ok(ApiSuccess(ApiResponse::success(star, codes::STAR_UPDATED), StatusCode::OK))
}

/// Soft-delete a star
#[utoipa::path(
    delete,
    path = "/api/v1/filmoteka/star/{id}",
    params(
        ("id" = i64, Path, description = "Star ID")
    ),
    responses(
        (status = 200, description = "Star deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Star not found or already deleted")
    ),
    tag = "Stars",
    security(("bearer_auth" = []))
)]
pub async fn delete_star(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    EntityId(id): EntityId,
) -> Result<ApiSuccess<ApiResponse<()>>, AppError> {
    StarService::delete(state, id).await?;
    info!(star_id = id, actor = %identity.username, "star deleted");

    Ok(ApiSuccess(ApiResponse::empty(codes::STAR_DELETED), StatusCode::OK))
}
