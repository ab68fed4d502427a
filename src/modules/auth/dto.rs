use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::model::{Role, User};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignUpRequest {
    #[validate(length(min = 1, max = 16, message = "Username must be 1-16 characters"))]
    pub username: String,
    #[validate(length(min = 1, max = 100, message = "Password must be 1-100 characters"))]
    pub password: String,
    /// `admin` or `user`.
    #[validate(custom(function = "validate_role"))]
    pub role: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 16))]
    pub username: String,
    #[validate(length(min = 1, max = 100))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Seconds until the token expires.
    pub expires_in: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub role: Role,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: OffsetDateTime,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            role: u.role,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

fn validate_role(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<Role>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("oneof").with_message("role must be admin or user".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(username: &str, password: &str, role: &str) -> SignUpRequest {
        SignUpRequest {
            username: username.into(),
            password: password.into(),
            role: role.into(),
        }
    }

    #[test]
    fn accepts_both_roles() {
        assert!(signup("alice", "pw1", "admin").validate().is_ok());
        assert!(signup("bob", "pw2", "user").validate().is_ok());
    }

    #[test]
    fn rejects_unknown_role() {
        let errors = signup("alice", "pw1", "superuser").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("role"));
    }

    #[test]
    fn rejects_long_or_empty_username() {
        assert!(signup("", "pw1", "user").validate().is_err());
        assert!(signup("a-very-long-username", "pw1", "user").validate().is_err());
    }
}
