use super::dto::{LoginRequest, SignUpRequest, TokenResponse, UserResponse};
use super::model::Role;
use super::repository::AuthRepository;
use crate::common::error::{has_sqlstate, AppError, AppResult, UNIQUE_VIOLATION};
use crate::common::security;
use crate::state::AppState;

pub struct AuthService;

impl AuthService {
    pub async fn sign_up(state: AppState, req: SignUpRequest) -> AppResult<UserResponse> {
        let role: Role = req
            .role
            .parse()
            .map_err(|_| AppError::InvalidInput(crate::common::codes::INVALID_BODY))?;

        if AuthRepository::username_exists(&state.db, &req.username).await? {
            return Err(AppError::UsernameExists);
        }

        let password_hash = security::hash_password(&req.password).await?;

        // a concurrent sign-up can still win the race; the unique index decides
        let user = AuthRepository::create_user(&state.db, &req.username, &password_hash, role)
            .await
            .map_err(|e| {
                if has_sqlstate(&e, UNIQUE_VIOLATION) {
                    AppError::UsernameExists
                } else {
                    AppError::Database(e)
                }
            })?;

        Ok(UserResponse::from(user))
    }

    pub async fn login(state: AppState, req: LoginRequest) -> AppResult<TokenResponse> {
        let Some(user) = AuthRepository::find_user_by_username(&state.db, &req.username).await? else {
            security::verify_unknown_user(&req.password).await;
            return Err(AppError::UserNotFound);
        };

        if !security::verify_password(&req.password, &user.password_hash).await? {
            return Err(AppError::WrongCredentials);
        }

        let issued = state.tokens.issue(&user.username, user.role)?;

        Ok(TokenResponse {
            access_token: issued.access_token,
            token_type: "Bearer".to_string(),
            expires_in: issued.expires_in,
        })
    }
}
