use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::MessageBody;
use crate::domain::profile::ports::ProfileServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Delete the caller's profile and account. The target is always the token
/// holder; no id is read from the request.
pub async fn delete_account(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
) -> Result<ApiSuccess<MessageBody>, ApiError> {
    state
        .profile_service
        .delete_account(&caller.user_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageBody::new("User Deleted")))
}
