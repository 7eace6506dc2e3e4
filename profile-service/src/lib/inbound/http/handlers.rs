use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::profile::errors::ProfileError;
use crate::domain::validation::ValidationErrors;
use crate::user::errors::UserError;

pub mod add_education;
pub mod add_experience;
pub mod current_user;
pub mod delete_account;
pub mod get_own_profile;
pub mod get_profile_by_user;
pub mod list_profiles;
pub mod login;
pub mod register;
pub mod remove_education;
pub mod remove_experience;
pub mod upsert_profile;

/// Successful response: status plus the bare JSON payload.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<T>);

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 400 with every failed field check
    Validation(ValidationErrors),
    /// 400 with a single business-rule error in the `errors` list
    Rejected(String),
    BadRequest(String),
    NotFound(String),
    Unauthorized(String),
    /// Details are logged, never sent
    InternalServerError(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    pub msg: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorListBody {
    pub errors: Vec<ErrorEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageBody {
    pub msg: String,
}

impl MessageBody {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                let errors = errors
                    .iter()
                    .map(|e| ErrorEntry {
                        param: Some(e.param.clone()),
                        msg: e.msg.clone(),
                    })
                    .collect();
                (StatusCode::BAD_REQUEST, Json(ErrorListBody { errors })).into_response()
            }
            ApiError::Rejected(msg) => {
                let errors = vec![ErrorEntry { param: None, msg }];
                (StatusCode::BAD_REQUEST, Json(ErrorListBody { errors })).into_response()
            }
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(MessageBody::new(msg))).into_response()
            }
            ApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(MessageBody::new(msg))).into_response()
            }
            ApiError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, Json(MessageBody::new(msg))).into_response()
            }
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(MessageBody::new("Server Error")),
                )
                    .into_response()
            }
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailAlreadyExists(_) => {
                ApiError::Rejected("email already taken".to_string())
            }
            UserError::InvalidCredentials => ApiError::Rejected("Invalid Credentials".to_string()),
            UserError::NotFound(_) => ApiError::NotFound("User not found".to_string()),
            UserError::DatabaseError(_) | UserError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<ProfileError> for ApiError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::NotFound(_) => {
                ApiError::BadRequest("there is no profile for this user".to_string())
            }
            ProfileError::EntryNotFound { kind, .. } => {
                ApiError::NotFound(format!("{} not found", kind))
            }
            ProfileError::Account(user_err) => ApiError::from(user_err),
            ProfileError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}
