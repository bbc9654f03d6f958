//! Repository Traits
//!
//! Capability interfaces for the external stores the session core
//! depends on. Implementations live in the infrastructure layer; tests
//! provide in-memory fakes.

use std::path::Path;

use crate::domain::entity::{credential::Credential, user::User};
use crate::domain::value_object::{email::Email, user_id::UserId, username::Username};
use crate::error::AccountResult;
use platform::password::PasswordDigest;

/// User profile repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AccountResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AccountResult<Option<User>>;

    /// Find user by canonical username
    async fn find_by_username(&self, username: &Username) -> AccountResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<User>>;

    /// Check if a canonical username is taken
    async fn exists_by_username(&self, username: &Username) -> AccountResult<bool>;

    /// Check if an email is taken
    async fn exists_by_email(&self, email: &Email) -> AccountResult<bool>;
}

/// Credential repository trait
///
/// The refresh-token write is the single source of truth for session
/// state: whichever write lands last defines the one live token.
#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    /// Create credentials for a new user
    async fn create(&self, credential: &Credential) -> AccountResult<()>;

    /// Find credentials by user ID
    async fn find_by_user_id(&self, user_id: &UserId) -> AccountResult<Option<Credential>>;

    /// Overwrite the stored refresh token (`None` revokes)
    async fn set_refresh_token(&self, user_id: &UserId, token: Option<&str>)
    -> AccountResult<()>;

    /// Replace the stored password digest
    async fn set_password_digest(
        &self,
        user_id: &UserId,
        digest: &PasswordDigest,
    ) -> AccountResult<()>;
}

/// Binary-asset upload capability
///
/// `Ok(None)` means the upload did not produce a URL, which callers
/// treat as failure for mandatory assets.
#[trait_variant::make(AssetStore: Send)]
pub trait LocalAssetStore {
    async fn upload(&self, local_path: &Path) -> AccountResult<Option<String>>;
}
