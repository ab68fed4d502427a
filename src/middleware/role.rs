use crate::common::error::AppError;
use crate::modules::auth::model::{Identity, Role};
use axum::{
    extract::{Extension, Request},
    middleware::Next,
    response::Response,
};

/// Read endpoints: lists and details.
pub const READERS: &[Role] = &[Role::Admin, Role::User];
/// Create, update and delete endpoints.
pub const ADMINS: &[Role] = &[Role::Admin];

/// Allow-list check. Expects an identity already established by the auth
/// middleware.
pub fn authorize(identity: &Identity, allowed: &[Role]) -> Result<(), AppError> {
    if allowed.contains(&identity.role) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

pub async fn admin_guard(
    Extension(identity): Extension<Identity>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(&identity, ADMINS)?;
    Ok(next.run(req).await)
}

pub async fn reader_guard(
    Extension(identity): Extension<Identity>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(&identity, READERS)?;
    Ok(next.run(req).await)
}
