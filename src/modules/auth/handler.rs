use super::dto::{LoginRequest, SignUpRequest, TokenResponse, UserResponse};
use super::service::AuthService;
use crate::common::codes;
use crate::common::error::AppError;
use crate::common::response::{ApiResponse, ApiSuccess};
use crate::common::validation::ValidatedJson;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode};
use tracing::info;

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserResponse>),
        (status = 400, description = "Malformed body"),
        (status = 409, description = "Username is taken"),
        (status = 422, description = "Validation error")
    ),
    tag = "Auth"
)]
pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignUpRequest>,
) -> Result<ApiSuccess<ApiResponse<UserResponse>>, AppError> {
    let user = AuthService::sign_up(state, payload).await?;
    info!(user_id = user.id, username = %user.username, role = %user.role, "user registered");

    Ok(ApiSuccess(ApiResponse::success(user, codes::USER_CREATED), StatusCode::CREATED))
}

/// Login user and get an access token
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<TokenResponse>),
        (status = 401, description = "Wrong credentials"),
        (status = 422, description = "Validation error")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<ApiSuccess<ApiResponse<TokenResponse>>, AppError> {
    let username = payload.username.clone();
    let token = AuthService::login(state, payload).await?;
    info!(%username, "user logged in");

    Ok(ApiSuccess(ApiResponse::success(token, codes::LOGIN_SUCCESS), StatusCode::OK))
}
