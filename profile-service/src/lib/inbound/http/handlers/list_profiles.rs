use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::profile::ports::ProfileServicePort;
use crate::inbound::http::messages::ProfileData;
use crate::inbound::http::router::AppState;

pub async fn list_profiles(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<ProfileData>>, ApiError> {
    let profiles = state.profile_service.list_profiles().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        profiles.iter().map(ProfileData::from).collect(),
    ))
}
