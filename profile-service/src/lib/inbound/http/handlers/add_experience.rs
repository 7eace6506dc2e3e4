use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::profile::models::EntryId;
use crate::domain::profile::models::Experience;
use crate::domain::profile::ports::ProfileServicePort;
use crate::domain::validation::ValidationErrors;
use crate::inbound::http::messages::non_blank;
use crate::inbound::http::messages::parse_date;
use crate::inbound::http::messages::ProfileData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn add_experience(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    Json(body): Json<AddExperienceRequest>,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    state
        .profile_service
        .add_experience(&caller.user_id, body.try_into_entry()?)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AddExperienceRequest {
    title: Option<String>,
    company: Option<String>,
    location: Option<String>,
    from: Option<String>,
    to: Option<String>,
    current: Option<bool>,
    description: Option<String>,
}

impl AddExperienceRequest {
    fn try_into_entry(self) -> Result<Experience, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = errors.require("title", self.title.as_deref(), "Title is required");
        let company = errors.require("company", self.company.as_deref(), "Company is required");
        let from = errors.check(
            "from",
            self.from.as_deref().and_then(parse_date).ok_or(()),
            "From date is required",
        );
        let to = match non_blank(self.to) {
            Some(raw) => errors.check("to", parse_date(&raw).ok_or(()), "To date is invalid"),
            None => None,
        };

        match (title, company, from) {
            (Some(title), Some(company), Some(from)) if errors.is_empty() => Ok(Experience {
                id: EntryId::new(),
                title,
                company,
                location: non_blank(self.location),
                from,
                to,
                current: self.current.unwrap_or(false),
                description: non_blank(self.description),
            }),
            _ => Err(errors),
        }
    }
}
