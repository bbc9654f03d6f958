//! Register Use Case
//!
//! Creates a user profile and its credentials. The avatar upload is
//! mandatory; registration fails without a stored avatar URL. No
//! session is created here, the client logs in afterwards.

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::entity::{credential::Credential, user::User};
use crate::domain::repository::{AssetStore, CredentialRepository, UserRepository};
use crate::domain::value_object::{email::Email, username::Username};
use crate::error::{AccountError, AccountResult};
use platform::password::Password;

/// Register input
pub struct RegisterInput {
    /// Desired handle
    pub username: String,
    /// Email address
    pub email: String,
    /// Display name
    pub full_name: String,
    /// Plaintext password
    pub password: String,
    /// Local path of the uploaded avatar file (mandatory)
    pub avatar_path: Option<PathBuf>,
    /// Local path of the uploaded cover image file (optional)
    pub cover_image_path: Option<PathBuf>,
}

/// Register use case
pub struct RegisterUseCase<U, C, A>
where
    U: UserRepository,
    C: CredentialRepository,
    A: AssetStore,
{
    user_repo: Arc<U>,
    credential_repo: Arc<C>,
    assets: Arc<A>,
}

impl<U, C, A> RegisterUseCase<U, C, A>
where
    U: UserRepository,
    C: CredentialRepository,
    A: AssetStore,
{
    pub fn new(user_repo: Arc<U>, credential_repo: Arc<C>, assets: Arc<A>) -> Self {
        Self {
            user_repo,
            credential_repo,
            assets,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AccountResult<User> {
        // All text fields must be present after trimming
        if input.full_name.trim().is_empty() {
            return Err(AccountError::Validation(
                "fullName must not be empty".to_string(),
            ));
        }

        let username = Username::new(&input.username)
            .map_err(|e| AccountError::Validation(e.to_string()))?;
        let email =
            Email::new(&input.email).map_err(|e| AccountError::Validation(e.to_string()))?;

        // Uniqueness is checked over both identifiers up front; the
        // database constraints remain the last line of defense.
        if self.user_repo.exists_by_username(&username).await? {
            return Err(AccountError::Conflict);
        }
        if self.user_repo.exists_by_email(&email).await? {
            return Err(AccountError::Conflict);
        }

        // Validate and hash the password before any uploads
        let password = Password::new(input.password)
            .map_err(|e| AccountError::Validation(e.to_string()))?;
        let digest = password
            .hash()
            .map_err(|e| AccountError::Internal(e.to_string()))?;

        // Avatar is mandatory; a missing file or a failed upload both
        // abort registration.
        let avatar_path = input
            .avatar_path
            .ok_or_else(|| AccountError::Asset("avatar file is required".to_string()))?;
        let avatar_url = self
            .assets
            .upload(&avatar_path)
            .await?
            .ok_or_else(|| AccountError::Asset("avatar upload failed".to_string()))?;

        // Cover image is optional; absent file means no cover, but a
        // provided file that fails to upload is still an error.
        let cover_image_url = match input.cover_image_path {
            Some(path) => Some(
                self.assets
                    .upload(&path)
                    .await?
                    .ok_or_else(|| AccountError::Asset("cover image upload failed".to_string()))?,
            ),
            None => None,
        };

        let user = User::new(
            username,
            email,
            input.full_name.trim().to_string(),
            avatar_url,
            cover_image_url,
        );
        let credential = Credential::new(user.user_id, digest);

        self.user_repo.create(&user).await?;
        self.credential_repo.create(&credential).await?;

        // Read the profile back so the response reflects exactly what
        // was persisted.
        let created = self
            .user_repo
            .find_by_id(&user.user_id)
            .await?
            .ok_or_else(|| {
                AccountError::Internal("user missing immediately after create".to_string())
            })?;

        tracing::info!(
            user_id = %created.user_id,
            username = %created.username.canonical(),
            "User registered"
        );

        Ok(created)
    }
}
