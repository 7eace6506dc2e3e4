use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::messages::CurrentUserData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Account of the token holder, without the password hash.
pub async fn current_user(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
) -> Result<ApiSuccess<CurrentUserData>, ApiError> {
    state
        .user_service
        .get_user(&caller.user_id)
        .await
        .map_err(|e| match e {
            // account deleted while the token is still alive
            UserError::NotFound(_) => ApiError::Unauthorized("Token is not valid".to_string()),
            _ => ApiError::from(e),
        })
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
