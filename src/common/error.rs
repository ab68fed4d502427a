use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::common::codes;
use crate::common::response::ApiResponse;

/// Errors every handler can return. Domain failures carry their own
/// `msg_code`; database and unexpected failures collapse to `general_internal`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Malformed id, body, query or header. Holds the `msg_code` to report.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("authorization header is missing")]
    MissingAuthHeader,

    #[error("invalid token")]
    InvalidToken,

    #[error("access denied")]
    Forbidden,

    #[error("user not found")]
    UserNotFound,

    #[error("wrong credentials")]
    WrongCredentials,

    #[error("username already exists")]
    UsernameExists,

    #[error("movie not found")]
    MovieNotFound,

    #[error("star not found")]
    StarNotFound,

    #[error("route not found")]
    RouteNotFound,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

/// One entry of the `data.errors` list in a 422 response.
#[derive(Debug, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    #[schema(value_type = Object)]
    pub params: serde_json::Value,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationBody {
    pub errors: Vec<FieldError>,
}

impl From<&ValidationErrors> for ValidationBody {
    fn from(errors: &ValidationErrors) -> Self {
        let mut list: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| FieldError {
                    field: field.to_string(),
                    code: e.code.to_string(),
                    params: serde_json::to_value(&e.params)
                        .unwrap_or(serde_json::Value::Null),
                })
            })
            .collect();
        list.sort_by(|a, b| a.field.cmp(&b.field));
        Self { errors: list }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::MissingAuthHeader
            | AppError::InvalidToken
            | AppError::UserNotFound
            | AppError::WrongCredentials => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::MovieNotFound | AppError::StarNotFound | AppError::RouteNotFound => {
                StatusCode::NOT_FOUND
            }
            AppError::UsernameExists => StatusCode::CONFLICT,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn msg_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => codes::VALIDATION,
            AppError::InvalidInput(code) => code,
            AppError::MissingAuthHeader => codes::AUTH_HEADER_REQUIRED,
            AppError::InvalidToken => codes::INVALID_JWT,
            AppError::Forbidden => codes::FORBIDDEN,
            // unknown user and bad password are indistinguishable to the caller
            AppError::UserNotFound | AppError::WrongCredentials => codes::WRONG_CREDENTIALS,
            AppError::UsernameExists => codes::USERNAME_IS_TAKEN,
            AppError::MovieNotFound => codes::MOVIE_NOT_FOUND,
            AppError::StarNotFound => codes::STAR_NOT_FOUND,
            AppError::RouteNotFound => codes::NOT_FOUND,
            AppError::MethodNotAllowed => codes::UNSUPPORTED_METHOD,
            AppError::Database(_) | AppError::Internal(_) => codes::INTERNAL,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::Validation(errors) => {
                let body = ApiResponse::error(codes::VALIDATION, Some(ValidationBody::from(errors)));
                return (status, Json(body)).into_response();
            }
            AppError::Database(err) => tracing::error!(error = %err, "database error"),
            AppError::Internal(err) => tracing::error!(error = ?err, "internal error"),
            other => tracing::debug!(error = %other, "request rejected"),
        }

        let body = ApiResponse::<()>::error(self.msg_code(), None);
        (status, Json(body)).into_response()
    }
}

/// Postgres SQLSTATE for a foreign key violation.
pub const FOREIGN_KEY_VIOLATION: &str = "23503";
/// Postgres SQLSTATE for a unique constraint violation.
pub const UNIQUE_VIOLATION: &str = "23505";

/// True when `err` is a database error carrying the given SQLSTATE.
pub fn has_sqlstate(err: &sqlx::Error, code: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(code),
        _ => false,
    }
}
