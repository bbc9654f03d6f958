//! Change Password Use Case
//!
//! Replaces the caller's password after verifying the current one, then
//! revokes the active refresh token. The caller keeps their access
//! token until it expires but must log in again to refresh.

use std::sync::Arc;

use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AccountError, AccountResult};
use platform::password::Password;

/// Change password input
pub struct ChangePasswordInput {
    /// Current plaintext password
    pub old_password: String,
    /// Replacement plaintext password
    pub new_password: String,
}

/// Change password use case
pub struct ChangePasswordUseCase<C>
where
    C: CredentialRepository,
{
    credential_repo: Arc<C>,
}

impl<C> ChangePasswordUseCase<C>
where
    C: CredentialRepository,
{
    pub fn new(credential_repo: Arc<C>) -> Self {
        Self { credential_repo }
    }

    pub async fn execute(&self, user_id: &UserId, input: ChangePasswordInput) -> AccountResult<()> {
        let credential = self
            .credential_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or(AccountError::Unauthorized)?;

        let old_password =
            Password::new(input.old_password).map_err(|_| AccountError::InvalidCredentials)?;

        if !credential.password_digest.verify(&old_password) {
            return Err(AccountError::InvalidCredentials);
        }

        // Policy is enforced on the new password only; the old one was
        // validated at registration time.
        let new_password = Password::new(input.new_password)
            .map_err(|e| AccountError::Validation(e.to_string()))?;
        let digest = new_password
            .hash()
            .map_err(|e| AccountError::Internal(e.to_string()))?;

        self.credential_repo
            .set_password_digest(user_id, &digest)
            .await?;

        // Revoke the session so a stolen refresh token dies with the
        // old password.
        self.credential_repo.set_refresh_token(user_id, None).await?;

        tracing::info!(user_id = %user_id, "Password changed, session revoked");

        Ok(())
    }
}
