//! User Entity
//!
//! Public user profile. Contains **no** password digest and no refresh
//! token; those live in [`Credential`](super::credential::Credential).
//! Whatever the transport serializes from this entity is already the
//! public projection.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{email::Email, user_id::UserId, username::Username};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Unique handle (case-normalized for uniqueness)
    pub username: Username,
    /// Unique, lowercased email address
    pub email: Email,
    /// Display name
    pub full_name: String,
    /// URL of the uploaded avatar asset (mandatory at registration)
    pub avatar_url: String,
    /// URL of the uploaded cover image asset, if any
    pub cover_image_url: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user profile
    pub fn new(
        username: Username,
        email: Email,
        full_name: String,
        avatar_url: String,
        cover_image_url: Option<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            username,
            email,
            full_name,
            avatar_url,
            cover_image_url,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_has_fresh_id() {
        let a = User::new(
            Username::new("alice").unwrap(),
            Email::new("alice@example.com").unwrap(),
            "Alice".into(),
            "https://cdn.example/avatar.png".into(),
            None,
        );
        let b = User::new(
            Username::new("bob").unwrap(),
            Email::new("bob@example.com").unwrap(),
            "Bob".into(),
            "https://cdn.example/avatar2.png".into(),
            None,
        );
        assert_ne!(a.user_id, b.user_id);
    }
}
