//! Email Value Object
//!
//! Represents a validated, lowercased email address. Basic format
//! validation only; deliverability is out of scope.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Error returned when email validation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("Email cannot be empty")]
    Empty,

    #[error("Email must be at most {EMAIL_MAX_LENGTH} characters")]
    TooLong,

    #[error("Invalid email format")]
    InvalidFormat,
}

/// Email address value object, stored lowercase
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Create a new email with validation and case normalization
    pub fn new(email: impl Into<String>) -> Result<Self, EmailError> {
        let email = email.into().trim().to_lowercase();

        if email.is_empty() {
            return Err(EmailError::Empty);
        }

        if email.len() > EMAIL_MAX_LENGTH {
            return Err(EmailError::TooLong);
        }

        if !Self::is_valid_format(&email) {
            return Err(EmailError::InvalidFormat);
        }

        Ok(Self(email))
    }

    fn is_valid_format(email: &str) -> bool {
        // Exactly one @
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        if domain.contains('@') {
            return false;
        }

        if local.is_empty() || local.len() > 64 {
            return false;
        }

        if domain.is_empty() || !domain.contains('.') {
            return false;
        }

        if !domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return false;
        }

        if domain.starts_with('.') || domain.ends_with('.') {
            return false;
        }
        if domain.starts_with('-') || domain.ends_with('-') {
            return false;
        }

        true
    }

    /// Reconstruct from stored value (assumes prior validation)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}
