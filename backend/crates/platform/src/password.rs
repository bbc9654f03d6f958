//! Password Hashing and Verification
//!
//! NIST SP 800-63B compliant password handling:
//! - Argon2id hashing with a per-call random salt
//! - Zeroization of clear-text material
//! - Constant-time verification (inside argon2)
//!
//! Hashing and verification are pure functions over their inputs; the
//! same secret never produces the same digest twice because the salt is
//! drawn fresh from the OS RNG on every call.

use std::fmt;

use argon2::{Argon2, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants (NIST SP 800-63B compliant)
// ============================================================================

/// Minimum password length (NIST: SHALL be at least 8)
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length (NIST: SHOULD permit at least 64)
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is too short
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// Password is too long
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// Password contains only whitespace
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    /// Password contains invalid characters (control characters)
    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid hash format
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// The raw secret is erased from memory when this value is dropped.
/// It does not implement `Clone`, and its `Debug` output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
    /// Create a clear text password with policy validation
    ///
    /// Unicode is normalized with NFKC before validation; length is
    /// counted in code points, not bytes.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let normalized: String = raw.nfkc().collect();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = normalized.chars().count();

        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        // Control characters other than space/tab are rejected
        for ch in normalized.chars() {
            if ch.is_control() && ch != ' ' && ch != '\t' {
                return Err(PasswordPolicyError::InvalidCharacter);
            }
        }

        Ok(Self(normalized))
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash the password with Argon2id
    ///
    /// Returns a PHC-formatted string carrying algorithm, parameters,
    /// salt and digest. Default parameters follow the OWASP
    /// recommendation (m=19456, t=2, p=1).
    pub fn hash(&self) -> Result<PasswordDigest, PasswordHashError> {
        let salt = SaltString::generate(OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(self.as_bytes(), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(PasswordDigest {
            phc: hash.to_string(),
        })
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Password").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Password Digest (safe to store)
// ============================================================================

/// One-way password digest in PHC string format
///
/// Safe to persist; contains no recoverable secret. `Debug` output is
/// redacted so the digest never leaks into logs either.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    phc: String,
}

impl PasswordDigest {
    /// Create from a stored PHC string, validating the format
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let phc = s.into();

        argon2::PasswordHash::new(&phc).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        Ok(Self { phc })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.phc
    }

    /// Verify a password against this digest
    ///
    /// Runs in time independent of where a mismatch occurs: the digest
    /// comparison inside argon2 is constant-time.
    pub fn verify(&self, password: &Password) -> bool {
        let parsed = match argon2::PasswordHash::new(&self.phc) {
            Ok(h) => h,
            Err(_) => return false,
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordDigest")
            .field("phc", &"[DIGEST]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_too_short() {
        let result = Password::new("short".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::TooShort { .. })));
    }

    #[test]
    fn test_password_too_long() {
        let long_password = "a".repeat(MAX_PASSWORD_LENGTH + 1);
        let result = Password::new(long_password);
        assert!(matches!(result, Err(PasswordPolicyError::TooLong { .. })));
    }

    #[test]
    fn test_password_empty() {
        let result = Password::new("".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::EmptyOrWhitespace)));
    }

    #[test]
    fn test_password_whitespace_only() {
        let result = Password::new("        ".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::EmptyOrWhitespace)));
    }

    #[test]
    fn test_password_control_chars() {
        let result = Password::new("pass\u{0000}word".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::InvalidCharacter)));
    }

    #[test]
    fn test_unicode_password() {
        let result = Password::new("パスワード安全です!".to_string());
        assert!(result.is_ok());
    }

    #[test]
    fn test_hash_and_verify() {
        let password = Password::new("correct-horse-battery".to_string()).unwrap();
        let digest = password.hash().unwrap();

        assert!(digest.verify(&password));

        let wrong = Password::new("incorrect-horse-battery".to_string()).unwrap();
        assert!(!digest.verify(&wrong));
    }

    #[test]
    fn test_salt_varies_per_call() {
        let password = Password::new("correct-horse-battery".to_string()).unwrap();
        let first = password.hash().unwrap();
        let second = password.hash().unwrap();

        // Different salts, different digests, both verify
        assert_ne!(first.as_phc_string(), second.as_phc_string());
        assert!(first.verify(&password));
        assert!(second.verify(&password));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let password = Password::new("correct-horse-battery".to_string()).unwrap();
        let digest = password.hash().unwrap();

        let phc = digest.as_phc_string().to_string();
        let restored = PasswordDigest::from_phc_string(phc).unwrap();

        assert!(restored.verify(&password));
    }

    #[test]
    fn test_invalid_phc_string() {
        let result = PasswordDigest::from_phc_string("not_a_valid_hash");
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redaction() {
        let password = Password::new("super-secret-pw".to_string()).unwrap();
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("super-secret-pw"));

        let digest = password.hash().unwrap();
        let debug_output = format!("{:?}", digest);
        assert!(!debug_output.contains("argon2"));
    }
}
