use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::profile::ports::ProfileServicePort;
use crate::inbound::http::messages::ProfileData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_own_profile(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    state
        .profile_service
        .get_own_profile(&caller.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}
