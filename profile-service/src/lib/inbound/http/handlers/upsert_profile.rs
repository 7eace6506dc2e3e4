use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::profile::models::ProfileFields;
use crate::domain::profile::models::Skills;
use crate::domain::profile::models::SocialLinks;
use crate::domain::profile::ports::ProfileServicePort;
use crate::domain::validation::ValidationErrors;
use crate::inbound::http::messages::non_blank;
use crate::inbound::http::messages::ProfileData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn upsert_profile(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    Json(body): Json<UpsertProfileRequest>,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    state
        .profile_service
        .upsert_profile(&caller.user_id, body.try_into_fields()?)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}

/// Flat profile form. Social links arrive as top-level keys and are folded
/// into `SocialLinks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UpsertProfileRequest {
    company: Option<String>,
    website: Option<String>,
    location: Option<String>,
    bio: Option<String>,
    status: Option<String>,
    githubusername: Option<String>,
    skills: Option<String>,
    youtube: Option<String>,
    facebook: Option<String>,
    twitter: Option<String>,
    linkedin: Option<String>,
    instagram: Option<String>,
}

impl UpsertProfileRequest {
    fn try_into_fields(self) -> Result<ProfileFields, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let status = errors.require("status", self.status.as_deref(), "Status is required");
        let skills = errors.check(
            "skills",
            Skills::parse(self.skills.as_deref().unwrap_or_default()),
            "Skills is required",
        );

        match (status, skills) {
            (Some(status), Some(skills)) => Ok(ProfileFields {
                company: non_blank(self.company),
                website: non_blank(self.website),
                location: non_blank(self.location),
                bio: non_blank(self.bio),
                status,
                github_username: non_blank(self.githubusername),
                skills,
                social: SocialLinks {
                    youtube: non_blank(self.youtube),
                    facebook: non_blank(self.facebook),
                    twitter: non_blank(self.twitter),
                    linkedin: non_blank(self.linkedin),
                    instagram: non_blank(self.instagram),
                },
            }),
            _ => Err(errors),
        }
    }
}
