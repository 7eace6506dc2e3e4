use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::profile::models::Education;
use crate::domain::profile::models::EntryId;
use crate::domain::profile::ports::ProfileServicePort;
use crate::domain::validation::ValidationErrors;
use crate::inbound::http::messages::non_blank;
use crate::inbound::http::messages::parse_date;
use crate::inbound::http::messages::ProfileData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn add_education(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    Json(body): Json<AddEducationRequest>,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    state
        .profile_service
        .add_education(&caller.user_id, body.try_into_entry()?)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AddEducationRequest {
    school: Option<String>,
    degree: Option<String>,
    fieldofstudy: Option<String>,
    from: Option<String>,
    to: Option<String>,
    current: Option<bool>,
    description: Option<String>,
}

impl AddEducationRequest {
    fn try_into_entry(self) -> Result<Education, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let school = errors.require("school", self.school.as_deref(), "School is required");
        let degree = errors.require("degree", self.degree.as_deref(), "Degree is required");
        let field_of_study = errors.require(
            "fieldofstudy",
            self.fieldofstudy.as_deref(),
            "Field of study is required",
        );
        let from = errors.check(
            "from",
            self.from.as_deref().and_then(parse_date).ok_or(()),
            "From date is required",
        );
        let to = match non_blank(self.to) {
            Some(raw) => errors.check("to", parse_date(&raw).ok_or(()), "To date is invalid"),
            None => None,
        };

        match (school, degree, field_of_study, from) {
            (Some(school), Some(degree), Some(field_of_study), Some(from)) if errors.is_empty() => {
                Ok(Education {
                    id: EntryId::new(),
                    school,
                    degree,
                    field_of_study,
                    from,
                    to,
                    current: self.current.unwrap_or(false),
                    description: non_blank(self.description),
                })
            }
            _ => Err(errors),
        }
    }
}
