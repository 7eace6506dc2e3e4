use std::fmt;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::profile::errors::EntryIdError;
use crate::domain::profile::errors::SkillsError;
use crate::domain::user::models::UserId;

/// Profile aggregate.
///
/// One per user. Owns its experience and education lists, both kept
/// newest-first.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: ProfileId,
    pub user_id: UserId,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: String,
    pub github_username: Option<String>,
    pub skills: Skills,
    pub social: SocialLinks,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Start a profile for `user_id` from a full set of scalar fields.
    pub fn new(user_id: UserId, fields: ProfileFields) -> Self {
        Self {
            id: ProfileId::new(),
            user_id,
            company: fields.company,
            website: fields.website,
            location: fields.location,
            bio: fields.bio,
            status: fields.status,
            github_username: fields.github_username,
            skills: fields.skills,
            social: fields.social,
            experience: Vec::new(),
            education: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Overwrite the scalar fields present in `fields`; absent ones keep their
    /// current value. Social links are replaced as a whole.
    pub fn apply(&mut self, fields: ProfileFields) {
        if let Some(company) = fields.company {
            self.company = Some(company);
        }
        if let Some(website) = fields.website {
            self.website = Some(website);
        }
        if let Some(location) = fields.location {
            self.location = Some(location);
        }
        if let Some(bio) = fields.bio {
            self.bio = Some(bio);
        }
        if let Some(github_username) = fields.github_username {
            self.github_username = Some(github_username);
        }
        self.status = fields.status;
        self.skills = fields.skills;
        self.social = fields.social;
    }

    pub fn prepend_experience(&mut self, entry: Experience) {
        self.experience.insert(0, entry);
    }

    pub fn prepend_education(&mut self, entry: Education) {
        self.education.insert(0, entry);
    }

    /// Remove the experience entry with `id`. Returns false, leaving the list
    /// untouched, if there is none.
    pub fn remove_experience(&mut self, id: &EntryId) -> bool {
        match self.experience.iter().position(|e| e.id == *id) {
            Some(index) => {
                self.experience.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove the education entry with `id`. Returns false, leaving the list
    /// untouched, if there is none.
    pub fn remove_education(&mut self, id: &EntryId) -> bool {
        match self.education.iter().position(|e| e.id == *id) {
            Some(index) => {
                self.education.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Profile unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProfileId(pub Uuid);

impl ProfileId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProfileId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier of an experience or education entry, unique within its list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an entry ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, EntryIdError> {
        Uuid::parse_str(s)
            .map(EntryId)
            .map_err(|e| EntryIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Ordered, trimmed skill names parsed from comma-separated input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Skills(Vec<String>);

impl Skills {
    /// Split `raw` on commas, trim each piece and drop empty ones.
    ///
    /// # Errors
    /// * `Empty` - No non-blank skill in the input
    pub fn parse(raw: &str) -> Result<Self, SkillsError> {
        let skills: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if skills.is_empty() {
            Err(SkillsError::Empty)
        } else {
            Ok(Self(skills))
        }
    }

    pub fn from_vec(skills: Vec<String>) -> Self {
        Self(skills)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Social network links. Only the recognized networks exist; a missing link is
/// `None`, never an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}


/// A job held, as listed on a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub id: EntryId,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

/// A course of study, as listed on a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub id: EntryId,
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

/// Validated scalar fields for create-or-update.
///
/// `None` means "not provided": on update the stored value is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileFields {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: String,
    pub github_username: Option<String>,
    pub skills: Skills,
    pub social: SocialLinks,
}

/// Display data of the profile's owner, joined in at read time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileOwner {
    pub id: UserId,
    pub name: String,
    pub avatar_url: String,
}

/// A profile together with its owner's display data.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedProfile {
    pub profile: Profile,
    pub owner: ProfileOwner,
}
