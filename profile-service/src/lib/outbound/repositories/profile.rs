use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::profile::errors::EntryKind;
use crate::domain::profile::errors::ProfileError;
use crate::domain::profile::models::Education;
use crate::domain::profile::models::EntryId;
use crate::domain::profile::models::Experience;
use crate::domain::profile::models::OwnedProfile;
use crate::domain::profile::models::Profile;
use crate::domain::profile::models::ProfileFields;
use crate::domain::profile::models::ProfileId;
use crate::domain::profile::models::ProfileOwner;
use crate::domain::profile::models::Skills;
use crate::domain::profile::models::SocialLinks;
use crate::domain::profile::ports::ProfileRepository;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

const PROFILE_COLUMNS: &str = "p.id, p.user_id, p.company, p.website, p.location, p.bio, \
     p.status, p.github_username, p.skills, p.social, p.experience, p.education, p.created_at";

/// Profiles stored one row per user, nested lists as JSONB arrays.
///
/// Every mutation is a single statement, so no read-modify-write window exists
/// between concurrent requests for the same user.
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn prepend_entry<T>(
        &self,
        user_id: &UserId,
        column: &'static str,
        entry: &T,
    ) -> Result<Profile, ProfileError>
    where
        T: serde::Serialize + Sync,
    {
        let sql = format!(
            r#"
            UPDATE profiles AS p
            SET {column} = jsonb_build_array($2::jsonb) || p.{column}
            WHERE p.user_id = $1
            RETURNING {PROFILE_COLUMNS}
            "#
        );

        sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(user_id.0)
            .bind(Json(entry))
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .map(Profile::from)
            .ok_or(ProfileError::NotFound(user_id.to_string()))
    }

    async fn remove_entry(
        &self,
        user_id: &UserId,
        kind: EntryKind,
        entry_id: &EntryId,
    ) -> Result<Profile, ProfileError> {
        let column = match kind {
            EntryKind::Experience => "experience",
            EntryKind::Education => "education",
        };

        // The containment guard makes an unknown id a no-op instead of a rewrite.
        let sql = format!(
            r#"
            UPDATE profiles AS p
            SET {column} = COALESCE(
                (
                    SELECT jsonb_agg(entry ORDER BY ord)
                    FROM jsonb_array_elements(p.{column}) WITH ORDINALITY AS t(entry, ord)
                    WHERE entry->>'id' <> $2
                ),
                '[]'::jsonb
            )
            WHERE p.user_id = $1
              AND p.{column} @> jsonb_build_array(jsonb_build_object('id', $2::text))
            RETURNING {PROFILE_COLUMNS}
            "#
        );

        let updated = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(user_id.0)
            .bind(entry_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        match updated {
            Some(row) => Ok(row.into()),
            None if self.exists(user_id).await? => Err(ProfileError::EntryNotFound {
                kind,
                id: entry_id.to_string(),
            }),
            None => Err(ProfileError::NotFound(user_id.to_string())),
        }
    }

    async fn exists(&self, user_id: &UserId) -> Result<bool, ProfileError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (SELECT 1 FROM profiles WHERE user_id = $1)
            "#,
        )
        .bind(user_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)
    }
}

fn database_error(e: sqlx::Error) -> ProfileError {
    ProfileError::DatabaseError(e.to_string())
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    user_id: Uuid,
    company: Option<String>,
    website: Option<String>,
    location: Option<String>,
    bio: Option<String>,
    status: String,
    github_username: Option<String>,
    skills: Vec<String>,
    social: Json<SocialLinks>,
    experience: Json<Vec<Experience>>,
    education: Json<Vec<Education>>,
    created_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            id: ProfileId(row.id),
            user_id: UserId(row.user_id),
            company: row.company,
            website: row.website,
            location: row.location,
            bio: row.bio,
            status: row.status,
            github_username: row.github_username,
            skills: Skills::from_vec(row.skills),
            social: row.social.0,
            experience: row.experience.0,
            education: row.education.0,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OwnedProfileRow {
    #[sqlx(flatten)]
    profile: ProfileRow,
    owner_name: String,
    owner_avatar_url: String,
}

impl From<OwnedProfileRow> for OwnedProfile {
    fn from(row: OwnedProfileRow) -> Self {
        let profile = Profile::from(row.profile);
        OwnedProfile {
            owner: ProfileOwner {
                id: profile.user_id,
                name: row.owner_name,
                avatar_url: row.owner_avatar_url,
            },
            profile,
        }
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<OwnedProfile>, ProfileError> {
        let sql = format!(
            r#"
            SELECT {PROFILE_COLUMNS}, u.name AS owner_name, u.avatar_url AS owner_avatar_url
            FROM profiles AS p
            JOIN users AS u ON u.id = p.user_id
            WHERE p.user_id = $1
            "#
        );

        Ok(sqlx::query_as::<_, OwnedProfileRow>(&sql)
            .bind(user_id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .map(OwnedProfile::from))
    }

    async fn list_all(&self) -> Result<Vec<OwnedProfile>, ProfileError> {
        let sql = format!(
            r#"
            SELECT {PROFILE_COLUMNS}, u.name AS owner_name, u.avatar_url AS owner_avatar_url
            FROM profiles AS p
            JOIN users AS u ON u.id = p.user_id
            ORDER BY p.created_at
            "#
        );

        let rows = sqlx::query_as::<_, OwnedProfileRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(rows.into_iter().map(OwnedProfile::from).collect())
    }

    async fn upsert(
        &self,
        user_id: &UserId,
        fields: ProfileFields,
    ) -> Result<Profile, ProfileError> {
        // Absent scalars keep the stored value; social links are replaced whole.
        let sql = format!(
            r#"
            INSERT INTO profiles AS p (
                id, user_id, company, website, location, bio,
                status, github_username, skills, social, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (user_id) DO UPDATE SET
                company = COALESCE(EXCLUDED.company, p.company),
                website = COALESCE(EXCLUDED.website, p.website),
                location = COALESCE(EXCLUDED.location, p.location),
                bio = COALESCE(EXCLUDED.bio, p.bio),
                status = EXCLUDED.status,
                github_username = COALESCE(EXCLUDED.github_username, p.github_username),
                skills = EXCLUDED.skills,
                social = EXCLUDED.social
            RETURNING {PROFILE_COLUMNS}
            "#
        );

        sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(ProfileId::new().0)
            .bind(user_id.0)
            .bind(fields.company)
            .bind(fields.website)
            .bind(fields.location)
            .bind(fields.bio)
            .bind(fields.status)
            .bind(fields.github_username)
            .bind(fields.skills.as_slice().to_vec())
            .bind(Json(fields.social))
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map(Profile::from)
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_foreign_key_violation() {
                        return ProfileError::Account(UserError::NotFound(user_id.to_string()));
                    }
                }
                database_error(e)
            })
    }

    async fn prepend_experience(
        &self,
        user_id: &UserId,
        entry: Experience,
    ) -> Result<Profile, ProfileError> {
        self.prepend_entry(user_id, "experience", &entry).await
    }

    async fn prepend_education(
        &self,
        user_id: &UserId,
        entry: Education,
    ) -> Result<Profile, ProfileError> {
        self.prepend_entry(user_id, "education", &entry).await
    }

    async fn remove_experience(
        &self,
        user_id: &UserId,
        entry_id: &EntryId,
    ) -> Result<Profile, ProfileError> {
        self.remove_entry(user_id, EntryKind::Experience, entry_id)
            .await
    }

    async fn remove_education(
        &self,
        user_id: &UserId,
        entry_id: &EntryId,
    ) -> Result<Profile, ProfileError> {
        self.remove_entry(user_id, EntryKind::Education, entry_id)
            .await
    }

    async fn delete_by_user(&self, user_id: &UserId) -> Result<bool, ProfileError> {
        let result = sqlx::query(
            r#"
            DELETE FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }
}
