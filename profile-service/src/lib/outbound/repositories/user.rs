use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Name;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    avatar_url: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            name: Name::new(row.name)
                .map_err(|e| UserError::DatabaseError(format!("Corrupt user row: {}", e)))?,
            email: EmailAddress::new(row.email)
                .map_err(|e| UserError::DatabaseError(format!("Corrupt user row: {}", e)))?,
            password_hash: row.password_hash,
            avatar_url: row.avatar_url,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, avatar_url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id.0)
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(&user.avatar_url)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key")
                {
                    return UserError::EmailAlreadyExists(user.email.to_string());
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, avatar_url, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?
        .map(User::try_from)
        .transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, avatar_url, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?
        .map(User::try_from)
        .transpose()
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        // profiles.user_id cascades.
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
