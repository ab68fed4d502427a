use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::common::codes;
use crate::common::error::AppError;

/// JSON body that has passed `validator` checks.
///
/// A body that cannot be decoded is a 400 `invalid_request_body`; a decoded
/// body that fails validation is a 422.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection, "rejected request body");
                AppError::InvalidInput(codes::INVALID_BODY)
            })?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Query string that has passed `validator` checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection, "rejected query string");
                AppError::InvalidInput(codes::INVALID_QUERY_PARAMS)
            })?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Positive integer id taken from the last path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(pub i64);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) if id > 0 => Ok(Self(id)),
            _ => Err(AppError::InvalidInput(codes::INVALID_ID)),
        }
    }
}

pub fn validate_rfc3339(value: &str) -> Result<(), ValidationError> {
    OffsetDateTime::parse(value, &Rfc3339)
        .map(|_| ())
        .map_err(|_| ValidationError::new("date"))
}

/// Parses an already validated RFC 3339 field, reporting a 422 on `field`
/// if it somehow does not parse.
pub fn parse_rfc3339(value: &str, field: &'static str) -> Result<OffsetDateTime, AppError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|_| {
        let mut errors = ValidationErrors::new();
        errors.add(field, ValidationError::new("date"));
        AppError::Validation(errors)
    })
}
