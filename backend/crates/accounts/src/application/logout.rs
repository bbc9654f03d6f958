//! Logout Use Case
//!
//! Revokes the caller's refresh token. Idempotent: logging out with no
//! active session is still a success.

use std::sync::Arc;

use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::AccountResult;

/// Logout use case
pub struct LogoutUseCase<C>
where
    C: CredentialRepository,
{
    credential_repo: Arc<C>,
}

impl<C> LogoutUseCase<C>
where
    C: CredentialRepository,
{
    pub fn new(credential_repo: Arc<C>) -> Self {
        Self { credential_repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> AccountResult<()> {
        self.credential_repo.set_refresh_token(user_id, None).await?;

        tracing::info!(user_id = %user_id, "User logged out");

        Ok(())
    }
}
