//! Token Issuer
//!
//! Mints and verifies the two token classes as HS256 JWTs carrying
//! `{sub, iat, exp}`. Access tokens are short-lived and stateless;
//! refresh tokens are longer-lived and additionally checked against
//! stored state by the session use cases.
//!
//! Verification failures (bad signature, expiry, malformed subject) are
//! deliberately folded into a single `Unauthorized` error so callers
//! cannot distinguish forgery from staleness.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::config::SessionConfig;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AccountError, AccountResult};

/// Which token class to mint or verify
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Short-lived, stateless; authorizes individual requests
    Access,
    /// Longer-lived, stateful; only mints new pairs
    Refresh,
}

/// Signed claims: subject (user id) plus issue/expiry instants
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Claims that passed signature and expiry checks
#[derive(Debug, Clone)]
pub struct VerifiedClaims {
    pub user_id: UserId,
    pub expires_at: i64,
}

/// An access/refresh pair minted together at login or rotation
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues and verifies both token classes with independent secrets
pub struct TokenIssuer {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl TokenIssuer {
    /// Build an issuer from config
    ///
    /// Empty secrets are rejected here as well as at config load, so a
    /// hand-built config cannot silently sign with an empty key.
    pub fn new(config: &SessionConfig) -> AccountResult<Self> {
        if config.access_token_secret.is_empty() || config.refresh_token_secret.is_empty() {
            return Err(AccountError::Config(
                "token secrets must be non-empty".to_string(),
            ));
        }

        Ok(Self {
            access_encoding: EncodingKey::from_secret(config.access_token_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.access_token_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.refresh_token_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_token_secret.as_bytes()),
            access_ttl_secs: config.access_ttl.as_secs() as i64,
            refresh_ttl_secs: config.refresh_ttl.as_secs() as i64,
        })
    }

    /// Sign a token of the given kind for a user
    pub fn issue(&self, user_id: &UserId, kind: TokenKind) -> AccountResult<String> {
        let now = Utc::now().timestamp();
        let (key, ttl) = match kind {
            TokenKind::Access => (&self.access_encoding, self.access_ttl_secs),
            TokenKind::Refresh => (&self.refresh_encoding, self.refresh_ttl_secs),
        };

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + ttl,
        };

        encode(&Header::default(), &claims, key)
            .map_err(|e| AccountError::Internal(format!("token signing failed: {e}")))
    }

    /// Mint a fresh access + refresh pair
    pub fn issue_pair(&self, user_id: &UserId) -> AccountResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.issue(user_id, TokenKind::Access)?,
            refresh_token: self.issue(user_id, TokenKind::Refresh)?,
        })
    }

    /// Check signature and expiry under the kind's secret
    pub fn verify(&self, token: &str, kind: TokenKind) -> AccountResult<VerifiedClaims> {
        let key = match kind {
            TokenKind::Access => &self.access_decoding,
            TokenKind::Refresh => &self.refresh_decoding,
        };

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data =
            decode::<Claims>(token, key, &validation).map_err(|_| AccountError::Unauthorized)?;

        let uuid: Uuid = data
            .claims
            .sub
            .parse()
            .map_err(|_| AccountError::Unauthorized)?;

        Ok(VerifiedClaims {
            user_id: UserId::from_uuid(uuid),
            expires_at: data.claims.exp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(&SessionConfig::development()).unwrap()
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let issuer = issuer();
        let user_id = UserId::new();

        let token = issuer.issue(&user_id, TokenKind::Access).unwrap();
        let claims = issuer.verify(&token, TokenKind::Access).unwrap();
        assert_eq!(claims.user_id, user_id);
        assert!(claims.expires_at > Utc::now().timestamp());
    }

    #[test]
    fn test_secrets_are_independent() {
        let issuer = issuer();
        let user_id = UserId::new();

        // A refresh token must not verify under the access secret,
        // and vice versa.
        let refresh = issuer.issue(&user_id, TokenKind::Refresh).unwrap();
        assert!(matches!(
            issuer.verify(&refresh, TokenKind::Access),
            Err(AccountError::Unauthorized)
        ));

        let access = issuer.issue(&user_id, TokenKind::Access).unwrap();
        assert!(matches!(
            issuer.verify(&access, TokenKind::Refresh),
            Err(AccountError::Unauthorized)
        ));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let issuer = issuer();
        let token = issuer.issue(&UserId::new(), TokenKind::Access).unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        assert!(matches!(
            issuer.verify(&tampered, TokenKind::Access),
            Err(AccountError::Unauthorized)
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let issuer = issuer();
        assert!(matches!(
            issuer.verify("not-a-jwt", TokenKind::Refresh),
            Err(AccountError::Unauthorized)
        ));
    }

    #[test]
    fn test_pair_tokens_differ() {
        let issuer = issuer();
        let pair = issuer.issue_pair(&UserId::new()).unwrap();
        assert!(!pair.access_token.is_empty());
        assert!(!pair.refresh_token.is_empty());
        assert_ne!(pair.access_token, pair.refresh_token);
    }

    #[test]
    fn test_empty_secret_rejected() {
        let config = SessionConfig {
            access_token_secret: String::new(),
            ..SessionConfig::development()
        };
        assert!(matches!(
            TokenIssuer::new(&config),
            Err(AccountError::Config(_))
        ));
    }
}
