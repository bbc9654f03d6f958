//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{credential::Credential, user::User};
use crate::domain::repository::{CredentialRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_id::UserId, username::Username};
use crate::error::{AccountError, AccountResult};
use platform::password::PasswordDigest;

/// PostgreSQL-backed account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAccountRepository {
    async fn create(&self, user: &User) -> AccountResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                username,
                username_canonical,
                email,
                full_name,
                avatar_url,
                cover_image_url,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.username.original())
        .bind(user.username.canonical())
        .bind(user.email.as_str())
        .bind(&user.full_name)
        .bind(&user.avatar_url)
        .bind(&user.cover_image_url)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AccountResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                username,
                username_canonical,
                email,
                full_name,
                avatar_url,
                cover_image_url,
                created_at,
                updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_user()))
    }

    async fn find_by_username(&self, username: &Username) -> AccountResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                username,
                username_canonical,
                email,
                full_name,
                avatar_url,
                cover_image_url,
                created_at,
                updated_at
            FROM users
            WHERE username_canonical = $1
            "#,
        )
        .bind(username.canonical())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_user()))
    }

    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                username,
                username_canonical,
                email,
                full_name,
                avatar_url,
                cover_image_url,
                created_at,
                updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_user()))
    }

    async fn exists_by_username(&self, username: &Username) -> AccountResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username_canonical = $1)",
        )
        .bind(username.canonical())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_by_email(&self, email: &Email) -> AccountResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

// ============================================================================
// Credential Repository Implementation
// ============================================================================

impl CredentialRepository for PgAccountRepository {
    async fn create(&self, credential: &Credential) -> AccountResult<()> {
        sqlx::query(
            r#"
            INSERT INTO credentials (
                user_id,
                password_phc,
                current_refresh_token,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(credential.user_id.as_uuid())
        .bind(credential.password_digest.as_phc_string())
        .bind(&credential.current_refresh_token)
        .bind(credential.created_at)
        .bind(credential.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> AccountResult<Option<Credential>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT
                user_id,
                password_phc,
                current_refresh_token,
                created_at,
                updated_at
            FROM credentials
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_credential()).transpose()
    }

    async fn set_refresh_token(
        &self,
        user_id: &UserId,
        token: Option<&str>,
    ) -> AccountResult<()> {
        // Single UPDATE, so concurrent rotations serialize at the row
        // and the last write defines the one live token.
        sqlx::query(
            r#"
            UPDATE credentials SET
                current_refresh_token = $2,
                updated_at = $3
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(token)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn set_password_digest(
        &self,
        user_id: &UserId,
        digest: &PasswordDigest,
    ) -> AccountResult<()> {
        sqlx::query(
            r#"
            UPDATE credentials SET
                password_phc = $2,
                updated_at = $3
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(digest.as_phc_string())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    username: String,
    #[allow(dead_code)]
    username_canonical: String,
    email: String,
    full_name: String,
    avatar_url: String,
    cover_image_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            user_id: UserId::from_uuid(self.user_id),
            username: Username::from_db(&self.username),
            email: Email::from_db(self.email),
            full_name: self.full_name,
            avatar_url: self.avatar_url,
            cover_image_url: self.cover_image_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    user_id: Uuid,
    password_phc: String,
    current_refresh_token: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CredentialRow {
    fn into_credential(self) -> AccountResult<Credential> {
        let password_digest = PasswordDigest::from_phc_string(self.password_phc)
            .map_err(|e| AccountError::Internal(format!("Invalid password digest: {}", e)))?;

        Ok(Credential {
            user_id: UserId::from_uuid(self.user_id),
            password_digest,
            current_refresh_token: self.current_refresh_token,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
