use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::profile::errors::EntryKind;
use crate::domain::profile::models::EntryId;
use crate::domain::profile::ports::ProfileServicePort;
use crate::inbound::http::messages::ProfileData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn remove_experience(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    Path(exp_id): Path<String>,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    let entry_id = EntryId::from_string(&exp_id)
        .map_err(|_| ApiError::NotFound(format!("{} not found", EntryKind::Experience)))?;

    state
        .profile_service
        .remove_experience(&caller.user_id, &entry_id)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}
