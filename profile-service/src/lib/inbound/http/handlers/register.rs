use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::ports::UserServicePort;
use crate::domain::validation::ValidationErrors;
use crate::inbound::http::messages::TokenData;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<TokenData>, ApiError> {
    state
        .user_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, TokenData { token }))
}

/// HTTP request body for registration. Missing fields are reported as
/// validation errors rather than rejected by the JSON extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, ValidationErrors> {
        RegisterUserCommand::parse(
            self.name.as_deref().unwrap_or_default(),
            self.email.as_deref().unwrap_or_default(),
            self.password.as_deref().unwrap_or_default(),
        )
    }
}
