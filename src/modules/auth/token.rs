//! Stateless HS256 access tokens.
//!
//! A token carries the username, role, a fixed token type, issue/expiry
//! times and a random `jti`. Verification is signature + expiry + type only;
//! there is no server-side session or revocation list.

use anyhow::anyhow;
use jsonwebtoken::{decode, encode, get_current_timestamp, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::{Identity, Role};
use crate::common::error::AppError;

pub const ACCESS_TOKEN_TYPE: &str = "access_token";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    pub sub: String,
    pub role: Role,
    pub token_type: String,
    pub jti: String,
    pub iat: u64,
    pub exp: u64,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: u64,
}

#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_seconds: u64,
}

impl TokenService {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds: u64::try_from(ttl_minutes.max(1)).unwrap_or(15).saturating_mul(60),
        }
    }

    pub fn issue(&self, username: &str, role: Role) -> Result<IssuedToken, AppError> {
        let now = get_current_timestamp();
        let claims = TokenClaims {
            sub: username.to_string(),
            role,
            token_type: ACCESS_TOKEN_TYPE.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now,
            exp: now.saturating_add(self.ttl_seconds),
        };

        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(anyhow!("sign token: {e}")))?;

        Ok(IssuedToken {
            access_token,
            expires_in: self.ttl_seconds,
        })
    }

    /// Any parse, signature, algorithm, expiry or type failure is `InvalidToken`.
    pub fn verify(&self, token: &str) -> Result<Identity, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<TokenClaims>(token, &self.decoding, &validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "token rejected");
                AppError::InvalidToken
            })?
            .claims;

        if claims.token_type != ACCESS_TOKEN_TYPE {
            return Err(AppError::InvalidToken);
        }

        Ok(Identity {
            username: claims.sub,
            role: claims.role,
        })
    }
}
