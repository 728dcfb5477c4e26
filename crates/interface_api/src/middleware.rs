//! API middleware

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use infra_db::UserRepository;
use tracing::{info, warn};

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::AppState;

/// Authentication middleware
///
/// Resolves an `Authorization: Bearer` token into the current user and
/// stores it in the request extensions. Requests without a header pass
/// through anonymously; a header that fails validation is rejected, as is
/// a token whose user no longer exists.
pub async fn auth_context(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        Some(_) => {
            warn!("Malformed Authorization header");
            return Err(ApiError::Unauthorized);
        }
        None => return Ok(next.run(request).await),
    };

    let claims = crate::auth::validate_token(token, &state.config.jwt_secret).map_err(|e| {
        warn!("Token validation failed: {e:?}");
        ApiError::Unauthorized
    })?;

    let user_id: i64 = claims.sub.parse().map_err(|_| ApiError::Unauthorized)?;

    let user = UserRepository::new(state.pool.clone())
        .find_by_id(user_id)
        .await
        .map_err(|_| ApiError::Unauthorized)?;

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

/// Audit logging middleware
///
/// Logs all API requests for debugging and traceability
pub async fn audit_middleware(
    State(_state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let user_id = request
        .extensions()
        .get::<CurrentUser>()
        .map(|c| c.0.id.to_string())
        .unwrap_or_else(|| "anonymous".to_string());

    let start = Utc::now();

    let response = next.run(request).await;

    let duration = Utc::now() - start;
    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        user = %user_id,
        status = %status.as_u16(),
        duration_ms = duration.num_milliseconds(),
        "API request"
    );

    response
}
