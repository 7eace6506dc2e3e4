use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::MutexGuard;

use async_trait::async_trait;

use crate::domain::profile::errors::EntryKind;
use crate::domain::profile::errors::ProfileError;
use crate::domain::profile::models::Education;
use crate::domain::profile::models::EntryId;
use crate::domain::profile::models::Experience;
use crate::domain::profile::models::OwnedProfile;
use crate::domain::profile::models::Profile;
use crate::domain::profile::models::ProfileFields;
use crate::domain::profile::models::ProfileOwner;
use crate::domain::profile::ports::ProfileRepository;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

#[derive(Default)]
struct Store {
    users: HashMap<UserId, User>,
    profiles: HashMap<UserId, Profile>,
}

/// Process-local store implementing both repository ports.
///
/// A single lock guards users and profiles, so the email uniqueness check and
/// the profile upsert are atomic with respect to concurrent requests.
#[derive(Default)]
pub struct InMemoryRepository {
    store: Mutex<Store>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, String> {
        self.store
            .lock()
            .map_err(|_| "in-memory store lock poisoned".to_string())
    }

    fn owned(store: &Store, profile: &Profile) -> Option<OwnedProfile> {
        store.users.get(&profile.user_id).map(|user| OwnedProfile {
            profile: profile.clone(),
            owner: ProfileOwner {
                id: user.id,
                name: user.name.as_str().to_string(),
                avatar_url: user.avatar_url.clone(),
            },
        })
    }

    fn with_profile<F>(&self, user_id: &UserId, mutate: F) -> Result<Profile, ProfileError>
    where
        F: FnOnce(&mut Profile) -> Result<(), ProfileError>,
    {
        let mut store = self.lock().map_err(ProfileError::DatabaseError)?;
        let profile = store
            .profiles
            .get_mut(user_id)
            .ok_or(ProfileError::NotFound(user_id.to_string()))?;

        // Mutate a copy so a failed closure leaves the stored document untouched.
        let mut updated = profile.clone();
        mutate(&mut updated)?;
        *profile = updated.clone();

        Ok(updated)
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut store = self.lock().map_err(UserError::DatabaseError)?;

        if store.users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        store.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let store = self.lock().map_err(UserError::DatabaseError)?;
        Ok(store.users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let store = self.lock().map_err(UserError::DatabaseError)?;
        Ok(store.users.values().find(|u| &u.email == email).cloned())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let mut store = self.lock().map_err(UserError::DatabaseError)?;

        match store.users.remove(id) {
            Some(_) => {
                store.profiles.remove(id);
                Ok(())
            }
            None => Err(UserError::NotFound(id.to_string())),
        }
    }
}

#[async_trait]
impl ProfileRepository for InMemoryRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<OwnedProfile>, ProfileError> {
        let store = self.lock().map_err(ProfileError::DatabaseError)?;
        Ok(store
            .profiles
            .get(user_id)
            .and_then(|profile| Self::owned(&store, profile)))
    }

    async fn list_all(&self) -> Result<Vec<OwnedProfile>, ProfileError> {
        let store = self.lock().map_err(ProfileError::DatabaseError)?;

        let mut profiles: Vec<OwnedProfile> = store
            .profiles
            .values()
            .filter_map(|profile| Self::owned(&store, profile))
            .collect();
        profiles.sort_by_key(|owned| owned.profile.created_at);

        Ok(profiles)
    }

    async fn upsert(
        &self,
        user_id: &UserId,
        fields: ProfileFields,
    ) -> Result<Profile, ProfileError> {
        let mut store = self.lock().map_err(ProfileError::DatabaseError)?;

        let profile = match store.profiles.get_mut(user_id) {
            Some(existing) => {
                existing.apply(fields);
                existing.clone()
            }
            None => {
                let created = Profile::new(*user_id, fields);
                store.profiles.insert(*user_id, created.clone());
                created
            }
        };

        Ok(profile)
    }

    async fn prepend_experience(
        &self,
        user_id: &UserId,
        entry: Experience,
    ) -> Result<Profile, ProfileError> {
        self.with_profile(user_id, |profile| {
            profile.prepend_experience(entry);
            Ok(())
        })
    }

    async fn prepend_education(
        &self,
        user_id: &UserId,
        entry: Education,
    ) -> Result<Profile, ProfileError> {
        self.with_profile(user_id, |profile| {
            profile.prepend_education(entry);
            Ok(())
        })
    }

    async fn remove_experience(
        &self,
        user_id: &UserId,
        entry_id: &EntryId,
    ) -> Result<Profile, ProfileError> {
        self.with_profile(user_id, |profile| {
            if profile.remove_experience(entry_id) {
                Ok(())
            } else {
                Err(ProfileError::EntryNotFound {
                    kind: EntryKind::Experience,
                    id: entry_id.to_string(),
                })
            }
        })
    }

    async fn remove_education(
        &self,
        user_id: &UserId,
        entry_id: &EntryId,
    ) -> Result<Profile, ProfileError> {
        self.with_profile(user_id, |profile| {
            if profile.remove_education(entry_id) {
                Ok(())
            } else {
                Err(ProfileError::EntryNotFound {
                    kind: EntryKind::Education,
                    id: entry_id.to_string(),
                })
            }
        })
    }

    async fn delete_by_user(&self, user_id: &UserId) -> Result<bool, ProfileError> {
        let mut store = self.lock().map_err(ProfileError::DatabaseError)?;
        Ok(store.profiles.remove(user_id).is_some())
    }
}
