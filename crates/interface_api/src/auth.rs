//! Authentication and authorization
//!
//! Bearer JWTs identify the calling user; token issuance endpoints are out
//! of scope, so `create_token` is used by operational tooling and tests.
//! Handlers take the [`AuthUser`] extractor when a user is required and
//! [`MaybeUser`] where anonymous reads are allowed.

use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::{Duration, Utc};
use infra_db::UserRow;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ApiError;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID, decimal)
    pub sub: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
}

/// Creates a new JWT token for a user
///
/// # Arguments
///
/// * `user_id` - User identifier
/// * `secret` - JWT secret key
/// * `expiration_secs` - Token validity in seconds
pub fn create_token(user_id: i64, secret: &str, expiration_secs: u64) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);

    let claims = Claims {
        sub: user_id.to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a JWT token and returns its claims
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        if e.to_string().contains("ExpiredSignature") {
            AuthError::TokenExpired
        } else {
            AuthError::InvalidToken
        }
    })?;

    Ok(token_data.claims)
}

/// The resolved user for the current request, inserted by the auth
/// middleware when a valid bearer token is present.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserRow);

/// Extractor for handlers that require an authenticated user.
///
/// Rejects with 401 when the request carried no (valid) token.
#[derive(Debug)]
pub struct AuthUser(pub UserRow);

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .map(|current| AuthUser(current.0.clone()))
            .ok_or(ApiError::Unauthorized)
    }
}

/// Extractor for handlers that serve both anonymous and authenticated
/// callers, such as recipe reads with per-user flags.
#[derive(Debug)]
pub struct MaybeUser(pub Option<UserRow>);

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for MaybeUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(
            parts.extensions.get::<CurrentUser>().map(|c| c.0.clone()),
        ))
    }
}
