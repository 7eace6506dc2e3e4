use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Header carrying the session token.
pub const TOKEN_HEADER: &str = "x-auth-token";

const MISSING_TOKEN: &str = "No token, authorization denied";
const INVALID_TOKEN: &str = "Token is not valid";

/// Identity established by [`authenticate`]. Handlers that take this as an
/// argument can only run behind the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that verifies the session token and attaches the caller's
/// identity to the request.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(req.headers())
        .ok_or_else(|| ApiError::Unauthorized(MISSING_TOKEN.to_string()))?;

    let claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Token rejected");
        ApiError::Unauthorized(INVALID_TOKEN.to_string())
    })?;

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not a user id");
        ApiError::Unauthorized(INVALID_TOKEN.to_string())
    })?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

/// `x-auth-token` wins; `Authorization: Bearer` is accepted as a fallback.
fn extract_token(headers: &HeaderMap) -> Option<&str> {
    let designated = headers
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|token| !token.is_empty());

    designated.or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
    })
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized(MISSING_TOKEN.to_string()))
    }
}
