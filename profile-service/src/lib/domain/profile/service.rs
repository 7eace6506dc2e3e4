use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::profile::errors::ProfileError;
use crate::domain::profile::models::Education;
use crate::domain::profile::models::EntryId;
use crate::domain::profile::models::Experience;
use crate::domain::profile::models::OwnedProfile;
use crate::domain::profile::models::Profile;
use crate::domain::profile::models::ProfileFields;
use crate::domain::profile::ports::ProfileRepository;
use crate::domain::profile::ports::ProfileServicePort;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

/// Domain service implementation for profile operations.
pub struct ProfileService<PR, UR>
where
    PR: ProfileRepository,
    UR: UserRepository,
{
    profiles: Arc<PR>,
    users: Arc<UR>,
}

impl<PR, UR> ProfileService<PR, UR>
where
    PR: ProfileRepository,
    UR: UserRepository,
{
    /// Create a new profile service with injected dependencies.
    ///
    /// # Arguments
    /// * `profiles` - Profile persistence implementation
    /// * `users` - User persistence, for ownership checks and account deletion
    pub fn new(profiles: Arc<PR>, users: Arc<UR>) -> Self {
        Self { profiles, users }
    }
}

#[async_trait]
impl<PR, UR> ProfileServicePort for ProfileService<PR, UR>
where
    PR: ProfileRepository,
    UR: UserRepository,
{
    async fn get_own_profile(&self, user_id: &UserId) -> Result<OwnedProfile, ProfileError> {
        self.profiles
            .find_by_user(user_id)
            .await?
            .ok_or(ProfileError::NotFound(user_id.to_string()))
    }

    async fn upsert_profile(
        &self,
        user_id: &UserId,
        fields: ProfileFields,
    ) -> Result<Profile, ProfileError> {
        // A token can outlive its account; don't start a profile for nobody.
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(UserError::NotFound(user_id.to_string()).into());
        }

        let profile = self.profiles.upsert(user_id, fields).await?;
        tracing::info!(user_id = %user_id, profile_id = %profile.id, "Profile saved");

        Ok(profile)
    }

    async fn list_profiles(&self) -> Result<Vec<OwnedProfile>, ProfileError> {
        self.profiles.list_all().await
    }

    async fn get_profile_by_user(&self, user_id: &UserId) -> Result<OwnedProfile, ProfileError> {
        self.profiles
            .find_by_user(user_id)
            .await?
            .ok_or(ProfileError::NotFound(user_id.to_string()))
    }

    async fn delete_account(&self, user_id: &UserId) -> Result<(), ProfileError> {
        let had_profile = self.profiles.delete_by_user(user_id).await?;
        self.users.delete(user_id).await?;

        tracing::info!(user_id = %user_id, had_profile, "Account deleted");

        Ok(())
    }

    async fn add_experience(
        &self,
        user_id: &UserId,
        entry: Experience,
    ) -> Result<Profile, ProfileError> {
        self.profiles.prepend_experience(user_id, entry).await
    }

    async fn remove_experience(
        &self,
        user_id: &UserId,
        entry_id: &EntryId,
    ) -> Result<Profile, ProfileError> {
        self.profiles.remove_experience(user_id, entry_id).await
    }

    async fn add_education(
        &self,
        user_id: &UserId,
        entry: Education,
    ) -> Result<Profile, ProfileError> {
        self.profiles.prepend_education(user_id, entry).await
    }

    async fn remove_education(
        &self,
        user_id: &UserId,
        entry_id: &EntryId,
    ) -> Result<Profile, ProfileError> {
        self.profiles.remove_education(user_id, entry_id).await
    }
}
