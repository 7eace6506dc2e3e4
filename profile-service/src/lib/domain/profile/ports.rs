use async_trait::async_trait;

use crate::domain::profile::errors::ProfileError;
use crate::domain::profile::models::Education;
use crate::domain::profile::models::EntryId;
use crate::domain::profile::models::Experience;
use crate::domain::profile::models::OwnedProfile;
use crate::domain::profile::models::Profile;
use crate::domain::profile::models::ProfileFields;
use crate::domain::user::models::UserId;

/// Port for profile operations.
///
/// Every `user_id` taken by a mutating operation must come from a verified
/// token, never from request input.
#[async_trait]
pub trait ProfileServicePort: Send + Sync + 'static {
    /// Profile of the authenticated user, with owner data.
    ///
    /// # Errors
    /// * `NotFound` - User has no profile yet
    /// * `DatabaseError` - Database operation failed
    async fn get_own_profile(&self, user_id: &UserId) -> Result<OwnedProfile, ProfileError>;

    /// Create the user's profile or update the provided fields of it.
    ///
    /// # Errors
    /// * `Account(NotFound)` - User no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn upsert_profile(
        &self,
        user_id: &UserId,
        fields: ProfileFields,
    ) -> Result<Profile, ProfileError>;

    /// All profiles, with owner data.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_profiles(&self) -> Result<Vec<OwnedProfile>, ProfileError>;

    /// Public lookup of a user's profile.
    ///
    /// # Errors
    /// * `NotFound` - User has no profile
    /// * `DatabaseError` - Database operation failed
    async fn get_profile_by_user(&self, user_id: &UserId) -> Result<OwnedProfile, ProfileError>;

    /// Delete the user's profile and then the user account itself.
    ///
    /// # Errors
    /// * `Account(NotFound)` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_account(&self, user_id: &UserId) -> Result<(), ProfileError>;

    /// Put `entry` at the front of the user's experience list.
    ///
    /// # Errors
    /// * `NotFound` - User has no profile
    /// * `DatabaseError` - Database operation failed
    async fn add_experience(
        &self,
        user_id: &UserId,
        entry: Experience,
    ) -> Result<Profile, ProfileError>;

    /// Remove one experience entry, keeping the order of the rest.
    ///
    /// # Errors
    /// * `NotFound` - User has no profile
    /// * `EntryNotFound` - No experience entry with that id
    /// * `DatabaseError` - Database operation failed
    async fn remove_experience(
        &self,
        user_id: &UserId,
        entry_id: &EntryId,
    ) -> Result<Profile, ProfileError>;

    /// Put `entry` at the front of the user's education list.
    ///
    /// # Errors
    /// * `NotFound` - User has no profile
    /// * `DatabaseError` - Database operation failed
    async fn add_education(
        &self,
        user_id: &UserId,
        entry: Education,
    ) -> Result<Profile, ProfileError>;

    /// Remove one education entry, keeping the order of the rest.
    ///
    /// # Errors
    /// * `NotFound` - User has no profile
    /// * `EntryNotFound` - No education entry with that id
    /// * `DatabaseError` - Database operation failed
    async fn remove_education(
        &self,
        user_id: &UserId,
        entry_id: &EntryId,
    ) -> Result<Profile, ProfileError>;
}

/// Persistence operations for the profile aggregate.
///
/// Each method is a single atomic write or read of one profile document.
#[async_trait]
pub trait ProfileRepository: Send + Sync + 'static {
    /// Profile of `user_id` joined with its owner.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<OwnedProfile>, ProfileError>;

    /// Every profile joined with its owner.
    async fn list_all(&self) -> Result<Vec<OwnedProfile>, ProfileError>;

    /// Atomically create the profile or merge `fields` into the existing one.
    async fn upsert(&self, user_id: &UserId, fields: ProfileFields)
        -> Result<Profile, ProfileError>;

    /// # Errors
    /// * `NotFound` - User has no profile
    async fn prepend_experience(
        &self,
        user_id: &UserId,
        entry: Experience,
    ) -> Result<Profile, ProfileError>;

    /// # Errors
    /// * `NotFound` - User has no profile
    async fn prepend_education(
        &self,
        user_id: &UserId,
        entry: Education,
    ) -> Result<Profile, ProfileError>;

    /// # Errors
    /// * `NotFound` - User has no profile
    /// * `EntryNotFound` - No such entry; nothing is written
    async fn remove_experience(
        &self,
        user_id: &UserId,
        entry_id: &EntryId,
    ) -> Result<Profile, ProfileError>;

    /// # Errors
    /// * `NotFound` - User has no profile
    /// * `EntryNotFound` - No such entry; nothing is written
    async fn remove_education(
        &self,
        user_id: &UserId,
        entry_id: &EntryId,
    ) -> Result<Profile, ProfileError>;

    /// Remove the profile of `user_id`.
    ///
    /// # Returns
    /// Whether a profile existed
    async fn delete_by_user(&self, user_id: &UserId) -> Result<bool, ProfileError>;
}
