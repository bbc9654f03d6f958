//! Refresh Session Use Case
//!
//! Exchanges a valid refresh token for a fresh token pair, rotating the
//! stored token in the process. A presented token must both carry a
//! valid signature AND be byte-for-byte identical to the stored value;
//! a rotated-away or revoked token fails the second check even though
//! its signature is still good.
//!
//! Every failure mode maps to `Unauthorized`, so a caller cannot probe
//! whether a token is malformed, expired, rotated, or for a deleted
//! account.

use std::sync::Arc;

use crate::application::token::{TokenIssuer, TokenKind, TokenPair};
use crate::domain::repository::CredentialRepository;
use crate::error::{AccountError, AccountResult};

/// Refresh session use case
pub struct RefreshSessionUseCase<C>
where
    C: CredentialRepository,
{
    credential_repo: Arc<C>,
    issuer: Arc<TokenIssuer>,
}

impl<C> RefreshSessionUseCase<C>
where
    C: CredentialRepository,
{
    pub fn new(credential_repo: Arc<C>, issuer: Arc<TokenIssuer>) -> Self {
        Self {
            credential_repo,
            issuer,
        }
    }

    pub async fn execute(&self, presented: Option<&str>) -> AccountResult<TokenPair> {
        let presented = presented.ok_or(AccountError::Unauthorized)?;

        // Signature and expiry first; this also yields the subject.
        let claims = self.issuer.verify(presented, TokenKind::Refresh)?;

        let credential = self
            .credential_repo
            .find_by_user_id(&claims.user_id)
            .await?
            .ok_or(AccountError::Unauthorized)?;

        // Stored-state check: only the single live token passes.
        if !credential.matches_refresh_token(presented) {
            tracing::warn!(
                user_id = %claims.user_id,
                "Refresh token valid but does not match stored token"
            );
            return Err(AccountError::Unauthorized);
        }

        // Rotate: the presented token dies here, the new one becomes
        // the live session token.
        let tokens = self.issuer.issue_pair(&claims.user_id)?;
        self.credential_repo
            .set_refresh_token(&claims.user_id, Some(&tokens.refresh_token))
            .await?;

        tracing::info!(user_id = %claims.user_id, "Session refreshed");

        Ok(tokens)
    }
}
