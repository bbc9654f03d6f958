//! Credential Entity
//!
//! Sensitive authentication state for a user, separated from the public
//! [`User`](super::user::User) profile. Holds the password digest and
//! the single active refresh token.
//!
//! Invariant: a user has zero or one valid refresh token at any time.
//! Issuing a new one overwrites the previous value; `None` means no
//! active session.

use chrono::{DateTime, Utc};
use platform::password::PasswordDigest;

use crate::domain::value_object::user_id::UserId;

/// Credential entity
#[derive(Debug, Clone)]
pub struct Credential {
    /// Reference to User
    pub user_id: UserId,
    /// One-way password digest (PHC format)
    pub password_digest: PasswordDigest,
    /// The single active refresh token, if a session exists
    pub current_refresh_token: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Credential {
    /// Create credentials for a freshly registered user (no session)
    pub fn new(user_id: UserId, password_digest: PasswordDigest) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            password_digest,
            current_refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Byte-for-byte comparison of a presented refresh token against the
    /// stored value. A syntactically valid token that fails this check
    /// has been rotated away or revoked.
    pub fn matches_refresh_token(&self, presented: &str) -> bool {
        match &self.current_refresh_token {
            Some(stored) => stored == presented,
            None => false,
        }
    }

    /// Replace the active refresh token (None revokes)
    pub fn set_refresh_token(&mut self, token: Option<String>) {
        self.current_refresh_token = token;
        self.updated_at = Utc::now();
    }

    /// Replace the password digest
    pub fn set_password_digest(&mut self, digest: PasswordDigest) {
        self.password_digest = digest;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::Password;

    fn digest() -> PasswordDigest {
        Password::new("correct-horse-battery".to_string())
            .unwrap()
            .hash()
            .unwrap()
    }

    #[test]
    fn test_fresh_credential_has_no_session() {
        let cred = Credential::new(UserId::new(), digest());
        assert!(cred.current_refresh_token.is_none());
        assert!(!cred.matches_refresh_token("anything"));
    }

    #[test]
    fn test_refresh_token_overwrite() {
        let mut cred = Credential::new(UserId::new(), digest());

        cred.set_refresh_token(Some("token-1".into()));
        assert!(cred.matches_refresh_token("token-1"));

        cred.set_refresh_token(Some("token-2".into()));
        assert!(!cred.matches_refresh_token("token-1"));
        assert!(cred.matches_refresh_token("token-2"));

        cred.set_refresh_token(None);
        assert!(!cred.matches_refresh_token("token-2"));
    }
}
