//! Username Value Object
//!
//! A username is the public handle a viewer registers and logs in with.
//! Case is preserved for display but uniqueness is decided on the
//! canonical (lowercase) form, so `Alice` and `alice` are the same
//! account.
//!
//! ## Invariants
//! - NFKC-normalized, trimmed
//! - 3 to 30 characters after normalization
//! - ASCII lowercase letters, digits, `_` `.` `-` only (canonical form)
//! - Starts and ends with a letter, digit or `_`
//! - No consecutive dots, at least one alphanumeric character

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Minimum length for a username (in characters)
pub const USERNAME_MIN_LENGTH: usize = 3;

/// Maximum length for a username (in characters)
pub const USERNAME_MAX_LENGTH: usize = 30;

const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.', '-'];

/// Error returned when username validation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsernameError {
    #[error("Username cannot be empty")]
    Empty,

    #[error("Username is too short ({length} chars, minimum {min})")]
    TooShort { length: usize, min: usize },

    #[error("Username is too long ({length} chars, maximum {max})")]
    TooLong { length: usize, max: usize },

    #[error("Invalid character '{char}' in username. Only a-z, 0-9, _, ., - are allowed")]
    InvalidCharacter { char: char },

    #[error("Username must start and end with a letter, digit or '_'")]
    InvalidBoundary,

    #[error("Username cannot contain consecutive dots (..)")]
    ConsecutiveDots,

    #[error("Username must contain at least one letter or digit")]
    NoAlphanumeric,
}

/// Validated, normalized username
///
/// ## Storage
/// - `original`: the user's input (trimmed, NFKC normalized, case kept)
/// - `canonical`: lowercase form used for uniqueness and lookups
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username {
    original: String,
    canonical: String,
}

impl Username {
    /// Create a Username from raw input
    ///
    /// Applies NFKC normalization and trimming, then validates the
    /// lowercase canonical form.
    pub fn new(input: impl AsRef<str>) -> Result<Self, UsernameError> {
        let original: String = input.as_ref().nfkc().collect::<String>().trim().to_string();
        let canonical = original.to_lowercase();
        Self::validate(&canonical)?;
        Ok(Self {
            original,
            canonical,
        })
    }

    /// Original user input (preserves case)
    #[inline]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Canonical (lowercase) form used for uniqueness
    #[inline]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// Reconstruct from stored values (assumes prior validation)
    pub fn from_db(original: &str) -> Self {
        Self {
            original: original.to_string(),
            canonical: original.to_lowercase(),
        }
    }

    fn validate(canonical: &str) -> Result<(), UsernameError> {
        if canonical.is_empty() {
            return Err(UsernameError::Empty);
        }

        let length = canonical.chars().count();
        if length < USERNAME_MIN_LENGTH {
            return Err(UsernameError::TooShort {
                length,
                min: USERNAME_MIN_LENGTH,
            });
        }
        if length > USERNAME_MAX_LENGTH {
            return Err(UsernameError::TooLong {
                length,
                max: USERNAME_MAX_LENGTH,
            });
        }

        for ch in canonical.chars() {
            if !(ch.is_ascii_lowercase() || ch.is_ascii_digit() || ALLOWED_SPECIAL_CHARS.contains(&ch))
            {
                return Err(UsernameError::InvalidCharacter { char: ch });
            }
        }

        // Non-empty was checked above
        if let (Some(first), Some(last)) = (canonical.chars().next(), canonical.chars().next_back())
        {
            if !Self::is_boundary_char(first) || !Self::is_boundary_char(last) {
                return Err(UsernameError::InvalidBoundary);
            }
        }

        if canonical.contains("..") {
            return Err(UsernameError::ConsecutiveDots);
        }

        if !canonical.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(UsernameError::NoAlphanumeric);
        }

        Ok(())
    }

    #[inline]
    fn is_boundary_char(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
    }
}

impl fmt::Debug for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Username")
            .field("original", &self.original)
            .field("canonical", &self.canonical)
            .finish()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.canonical
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(name: Username) -> Self {
        name.original
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_and_lowercase() {
        let name = Username::new("  AliceTube  ").unwrap();
        assert_eq!(name.canonical(), "alicetube");
        assert_eq!(name.original(), "AliceTube");
    }

    #[test]
    fn test_case_insensitive_equality_via_canonical() {
        let a = Username::new("Alice").unwrap();
        let b = Username::new("aLiCe").unwrap();
        assert_eq!(a.canonical(), b.canonical());
    }

    #[test]
    fn test_nfkc_normalization() {
        // Full-width 'Ａ' (U+FF21) becomes ASCII after NFKC
        let name = Username::new("Ａlice").unwrap();
        assert_eq!(name.canonical(), "alice");
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(matches!(Username::new(""), Err(UsernameError::Empty)));
        assert!(matches!(Username::new("   "), Err(UsernameError::Empty)));
    }

    #[test]
    fn test_length_bounds() {
        assert!(matches!(
            Username::new("ab"),
            Err(UsernameError::TooShort { length: 2, min: 3 })
        ));
        assert!(Username::new("abc").is_ok());
        assert!(Username::new("a".repeat(USERNAME_MAX_LENGTH)).is_ok());
        assert!(matches!(
            Username::new("a".repeat(USERNAME_MAX_LENGTH + 1)),
            Err(UsernameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_character_set() {
        assert!(Username::new("alice_123").is_ok());
        assert!(Username::new("alice.bob").is_ok());
        assert!(Username::new("alice-bob").is_ok());
        assert!(matches!(
            Username::new("alice@bob"),
            Err(UsernameError::InvalidCharacter { char: '@' })
        ));
        assert!(matches!(
            Username::new("alice bob"),
            Err(UsernameError::InvalidCharacter { char: ' ' })
        ));
        assert!(matches!(
            Username::new("日本語"),
            Err(UsernameError::InvalidCharacter { .. })
        ));
    }

    #[test]
    fn test_boundaries() {
        assert!(Username::new("_alice").is_ok());
        assert!(matches!(
            Username::new(".alice"),
            Err(UsernameError::InvalidBoundary)
        ));
        assert!(matches!(
            Username::new("alice-"),
            Err(UsernameError::InvalidBoundary)
        ));
    }

    #[test]
    fn test_patterns() {
        assert!(matches!(
            Username::new("alice..bob"),
            Err(UsernameError::ConsecutiveDots)
        ));
        assert!(Username::new("alice.bob.c").is_ok());
        assert!(matches!(
            Username::new("___"),
            Err(UsernameError::NoAlphanumeric)
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let name = Username::new("Alice").unwrap();
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"Alice\"");

        let back: Username = serde_json::from_str("\"ALICE\"").unwrap();
        assert_eq!(back.canonical(), "alice");

        let invalid: Result<Username, _> = serde_json::from_str("\"ab\"");
        assert!(invalid.is_err());
    }
}
