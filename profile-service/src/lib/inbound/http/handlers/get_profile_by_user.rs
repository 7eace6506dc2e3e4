use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::profile::errors::ProfileError;
use crate::domain::profile::ports::ProfileServicePort;
use crate::domain::user::models::UserId;
use crate::inbound::http::messages::ProfileData;
use crate::inbound::http::router::AppState;

const PROFILE_NOT_FOUND: &str = "Profile not found";

/// Public lookup. A malformed id is indistinguishable from an unknown one.
pub async fn get_profile_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    let user_id = UserId::from_string(&user_id)
        .map_err(|_| ApiError::BadRequest(PROFILE_NOT_FOUND.to_string()))?;

    state
        .profile_service
        .get_profile_by_user(&user_id)
        .await
        .map_err(|e| match e {
            ProfileError::NotFound(_) => ApiError::BadRequest(PROFILE_NOT_FOUND.to_string()),
            _ => ApiError::from(e),
        })
        .map(|ref profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}
