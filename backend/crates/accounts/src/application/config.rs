//! Application Configuration
//!
//! Configuration for the session core. The two token secrets are
//! independent on purpose: a leaked access-token secret must not allow
//! forging refresh tokens, and vice versa.

use std::env;
use std::time::Duration;

use crate::error::{AccountError, AccountResult};

/// Re-export cookie types from platform
pub use platform::cookie::{CookieConfig, SameSite};

/// Default access-token lifetime (15 minutes)
const DEFAULT_ACCESS_TTL_SECS: u64 = 15 * 60;

/// Default refresh-token lifetime (7 days)
const DEFAULT_REFRESH_TTL_SECS: u64 = 7 * 24 * 3600;

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC secret for access tokens
    pub access_token_secret: String,
    /// HMAC secret for refresh tokens (independent of the access secret)
    pub refresh_token_secret: String,
    /// Access-token lifetime (minutes scale)
    pub access_ttl: Duration,
    /// Refresh-token lifetime (days scale)
    pub refresh_ttl: Duration,
    /// Cookie name carrying the access token
    pub access_cookie_name: String,
    /// Cookie name carrying the refresh token
    pub refresh_cookie_name: String,
    /// Cookie attribute flags (HttpOnly/Secure/SameSite/Path)
    pub cookie: CookieConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            access_token_secret: String::new(),
            refresh_token_secret: String::new(),
            access_ttl: Duration::from_secs(DEFAULT_ACCESS_TTL_SECS),
            refresh_ttl: Duration::from_secs(DEFAULT_REFRESH_TTL_SECS),
            access_cookie_name: "accessToken".to_string(),
            refresh_cookie_name: "refreshToken".to_string(),
            cookie: CookieConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from the environment
    ///
    /// Fails when `ACCESS_TOKEN_SECRET` or `REFRESH_TOKEN_SECRET` is
    /// absent or empty; the process must not start without them. TTLs
    /// and cookie flags have defaults with env overrides.
    pub fn from_env() -> AccountResult<Self> {
        let access_token_secret = require_secret("ACCESS_TOKEN_SECRET")?;
        let refresh_token_secret = require_secret("REFRESH_TOKEN_SECRET")?;

        if access_token_secret == refresh_token_secret {
            return Err(AccountError::Config(
                "ACCESS_TOKEN_SECRET and REFRESH_TOKEN_SECRET must differ".to_string(),
            ));
        }

        let access_ttl = ttl_from_env("ACCESS_TOKEN_TTL_SECS", DEFAULT_ACCESS_TTL_SECS)?;
        let refresh_ttl = ttl_from_env("REFRESH_TOKEN_TTL_SECS", DEFAULT_REFRESH_TTL_SECS)?;

        let cookie_secure = match env::var("COOKIE_SECURE") {
            Ok(v) => v != "false" && v != "0",
            Err(_) => true,
        };

        Ok(Self {
            access_token_secret,
            refresh_token_secret,
            access_ttl,
            refresh_ttl,
            cookie: CookieConfig {
                secure: cookie_secure,
                ..CookieConfig::default()
            },
            ..Self::default()
        })
    }

    /// Create config for development and tests (random secrets,
    /// insecure cookie)
    pub fn development() -> Self {
        Self {
            access_token_secret: uuid::Uuid::new_v4().simple().to_string(),
            refresh_token_secret: uuid::Uuid::new_v4().simple().to_string(),
            cookie: CookieConfig {
                secure: false,
                ..CookieConfig::default()
            },
            ..Self::default()
        }
    }

    /// Access-token TTL in whole seconds (cookie Max-Age)
    pub fn access_ttl_secs(&self) -> i64 {
        self.access_ttl.as_secs() as i64
    }

    /// Refresh-token TTL in whole seconds (cookie Max-Age)
    pub fn refresh_ttl_secs(&self) -> i64 {
        self.refresh_ttl.as_secs() as i64
    }
}

fn require_secret(name: &str) -> AccountResult<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AccountError::Config(format!("{name} must be set"))),
    }
}

fn ttl_from_env(name: &str, default_secs: u64) -> AccountResult<Duration> {
    match env::var(name) {
        Ok(value) => {
            let secs: u64 = value
                .parse()
                .map_err(|_| AccountError::Config(format!("{name} must be an integer")))?;
            Ok(Duration::from_secs(secs))
        }
        Err(_) => Ok(Duration::from_secs(default_secs)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_config_has_distinct_secrets() {
        let config = SessionConfig::development();
        assert!(!config.access_token_secret.is_empty());
        assert!(!config.refresh_token_secret.is_empty());
        assert_ne!(config.access_token_secret, config.refresh_token_secret);
        assert!(!config.cookie.secure);
    }

    #[test]
    fn test_default_ttls() {
        let config = SessionConfig::development();
        assert_eq!(config.access_ttl_secs(), 900);
        assert_eq!(config.refresh_ttl_secs(), 7 * 24 * 3600);
    }
}
