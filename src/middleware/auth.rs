use crate::common::codes;
use crate::common::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

/// Verifies the bearer token and attaches the caller's `Identity` to the
/// request for the role gate and handlers downstream.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = {
        let token = bearer_token(req.headers())?;
        state.tokens.verify(token)?
    };

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Missing header is 401; anything not shaped `Bearer <token>` is 400.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AppError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AppError::InvalidInput(codes::INVALID_HEADER))?;

    match value.split(' ').collect::<Vec<_>>().as_slice() {
        ["Bearer", token] if !token.is_empty() => Ok(*token),
        _ => Err(AppError::InvalidInput(codes::INVALID_HEADER)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_token() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn missing_header_is_unauthorized() {
        assert!(matches!(bearer_token(&HeaderMap::new()), Err(AppError::MissingAuthHeader)));
    }

    #[test]
    fn malformed_header_is_invalid_input() {
        for value in ["Token abc", "Bearer", "Bearer ", "Bearer a b", "bearer abc"] {
            assert!(
                matches!(bearer_token(&headers_with(value)), Err(AppError::InvalidInput(_))),
                "{value:?} should be rejected"
            );
        }
    }
}
