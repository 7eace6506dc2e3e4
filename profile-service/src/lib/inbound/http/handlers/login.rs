use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::ports::UserServicePort;
use crate::domain::validation::ValidationErrors;
use crate::inbound::http::messages::TokenData;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<TokenData>, ApiError> {
    state
        .user_service
        .login(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, TokenData { token }))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, ValidationErrors> {
        LoginCommand::parse(
            self.email.as_deref().unwrap_or_default(),
            self.password.as_deref().unwrap_or_default(),
        )
    }
}
