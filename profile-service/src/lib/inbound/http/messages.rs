//! Serializable response types for the HTTP layer.
//!
//! Field names follow the public JSON contract (`_id`, `githubusername`,
//! `fieldofstudy`, `date`), which differs from the domain naming.

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Serialize;

use crate::domain::profile::models::Education;
use crate::domain::profile::models::Experience;
use crate::domain::profile::models::OwnedProfile;
use crate::domain::profile::models::Profile;
use crate::domain::profile::models::ProfileOwner;
use crate::domain::profile::models::SocialLinks;
use crate::domain::user::models::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenData {
    pub token: String,
}

/// Account data safe to return to its owner (no password hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUserData {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub date: DateTime<Utc>,
}

impl From<&User> for CurrentUserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            avatar: user.avatar_url.clone(),
            date: user.created_at,
        }
    }
}

/// The `user` field of a profile: the bare owner id after writes, the joined
/// owner on reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProfileUserData {
    Id(String),
    Owner {
        #[serde(rename = "_id")]
        id: String,
        name: String,
        avatar: String,
    },
}

impl From<&ProfileOwner> for ProfileUserData {
    fn from(owner: &ProfileOwner) -> Self {
        ProfileUserData::Owner {
            id: owner.id.to_string(),
            name: owner.name.clone(),
            avatar: owner.avatar_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExperienceData {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub from: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&Experience> for ExperienceData {
    fn from(entry: &Experience) -> Self {
        Self {
            id: entry.id.to_string(),
            title: entry.title.clone(),
            company: entry.company.clone(),
            location: entry.location.clone(),
            from: entry.from,
            to: entry.to,
            current: entry.current,
            description: entry.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EducationData {
    #[serde(rename = "_id")]
    pub id: String,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&Education> for EducationData {
    fn from(entry: &Education) -> Self {
        Self {
            id: entry.id.to_string(),
            school: entry.school.clone(),
            degree: entry.degree.clone(),
            fieldofstudy: entry.field_of_study.clone(),
            from: entry.from,
            to: entry.to,
            current: entry.current,
            description: entry.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileData {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: ProfileUserData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub githubusername: Option<String>,
    pub skills: Vec<String>,
    pub social: SocialLinks,
    pub experience: Vec<ExperienceData>,
    pub education: Vec<EducationData>,
    pub date: DateTime<Utc>,
}

impl ProfileData {
    fn with_user(profile: &Profile, user: ProfileUserData) -> Self {
        Self {
            id: profile.id.to_string(),
            user,
            company: profile.company.clone(),
            website: profile.website.clone(),
            location: profile.location.clone(),
            bio: profile.bio.clone(),
            status: profile.status.clone(),
            githubusername: profile.github_username.clone(),
            skills: profile.skills.as_slice().to_vec(),
            social: profile.social.clone(),
            experience: profile.experience.iter().map(ExperienceData::from).collect(),
            education: profile.education.iter().map(EducationData::from).collect(),
            date: profile.created_at,
        }
    }
}

impl From<&Profile> for ProfileData {
    fn from(profile: &Profile) -> Self {
        Self::with_user(profile, ProfileUserData::Id(profile.user_id.to_string()))
    }
}

impl From<&OwnedProfile> for ProfileData {
    fn from(owned: &OwnedProfile) -> Self {
        Self::with_user(&owned.profile, (&owned.owner).into())
    }
}

/// Parse a submitted date: `YYYY-MM-DD`, or an RFC 3339 timestamp whose UTC
/// date is taken.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    })
}

/// Treat missing and blank strings alike; keep the rest trimmed.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
