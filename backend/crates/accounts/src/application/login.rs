//! Login Use Case
//!
//! Authenticates a user by username or email and mints a fresh token
//! pair. The new refresh token overwrites whatever was stored before,
//! so a second login from another device ends the first session.

use std::sync::Arc;

use crate::application::token::{TokenIssuer, TokenPair};
use crate::domain::entity::user::User;
use crate::domain::repository::{CredentialRepository, UserRepository};
use crate::domain::value_object::{email::Email, username::Username};
use crate::error::{AccountError, AccountResult};
use platform::password::Password;

/// Login input
pub struct LoginInput {
    /// Handle, if logging in by username
    pub username: Option<String>,
    /// Address, if logging in by email
    pub email: Option<String>,
    /// Plaintext password
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    /// Authenticated user profile
    pub user: User,
    /// Freshly minted access + refresh pair
    pub tokens: TokenPair,
}

/// Login use case
pub struct LoginUseCase<U, C>
where
    U: UserRepository,
    C: CredentialRepository,
{
    user_repo: Arc<U>,
    credential_repo: Arc<C>,
    issuer: Arc<TokenIssuer>,
}

impl<U, C> LoginUseCase<U, C>
where
    U: UserRepository,
    C: CredentialRepository,
{
    pub fn new(user_repo: Arc<U>, credential_repo: Arc<C>, issuer: Arc<TokenIssuer>) -> Self {
        Self {
            user_repo,
            credential_repo,
            issuer,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AccountResult<LoginOutput> {
        // Either identifier works; neither is a malformed request, not
        // an authentication failure.
        let user = match (&input.username, &input.email) {
            (Some(raw), _) if !raw.trim().is_empty() => {
                let username =
                    Username::new(raw).map_err(|_| AccountError::NotFound)?;
                self.user_repo.find_by_username(&username).await?
            }
            (_, Some(raw)) if !raw.trim().is_empty() => {
                let email = Email::new(raw).map_err(|_| AccountError::NotFound)?;
                self.user_repo.find_by_email(&email).await?
            }
            _ => {
                return Err(AccountError::Validation(
                    "username or email is required".to_string(),
                ));
            }
        };

        let user = user.ok_or(AccountError::NotFound)?;

        let credential = self
            .credential_repo
            .find_by_user_id(&user.user_id)
            .await?
            .ok_or_else(|| {
                AccountError::Internal("credential missing for existing user".to_string())
            })?;

        // A password that fails policy cannot match any stored digest.
        let password =
            Password::new(input.password).map_err(|_| AccountError::InvalidCredentials)?;

        if !credential.password_digest.verify(&password) {
            return Err(AccountError::InvalidCredentials);
        }

        // Mint the pair, then persist the refresh token as the single
        // live session token for this user.
        let tokens = self.issuer.issue_pair(&user.user_id)?;
        self.credential_repo
            .set_refresh_token(&user.user_id, Some(&tokens.refresh_token))
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            username = %user.username.canonical(),
            "User logged in"
        );

        Ok(LoginOutput { user, tokens })
    }
}
