//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;

// ============================================================================
// Register
// ============================================================================

/// Register request
///
/// Asset fields carry the server-local paths of the staged uploads, as
/// produced by the upload middleware in front of this handler.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
    /// Staged avatar file path (mandatory)
    pub avatar: Option<String>,
    /// Staged cover image file path (optional)
    pub cover_image: Option<String>,
}

// ============================================================================
// Login
// ============================================================================

/// Login request (either `username` or `email` must be present)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: String,
}

/// Login response payload (inside the envelope's `data`)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
}

// ============================================================================
// Refresh
// ============================================================================

/// Refresh request body (fallback when the cookie is absent)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

/// Refresh response payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
}

// ============================================================================
// Change Password
// ============================================================================

/// Change password request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

// ============================================================================
// User Projection
// ============================================================================

/// Public user projection
///
/// Built from [`User`], which by construction carries no password
/// digest and no refresh token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar: String,
    pub cover_image: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id.to_string(),
            username: user.username.original().to_string(),
            email: user.email.as_str().to_string(),
            full_name: user.full_name.clone(),
            avatar: user.avatar_url.clone(),
            cover_image: user.cover_image_url.clone(),
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{email::Email, username::Username};

    #[test]
    fn test_user_response_has_no_secret_fields() {
        let user = User::new(
            Username::new("alice").unwrap(),
            Email::new("alice@example.com").unwrap(),
            "Alice".into(),
            "https://cdn.example/a.png".into(),
            None,
        );

        let json = serde_json::to_value(UserResponse::from(&user)).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();

        assert!(keys.contains(&"userId"));
        assert!(keys.contains(&"username"));
        assert!(!keys.iter().any(|k| k.to_lowercase().contains("password")));
        assert!(!keys.iter().any(|k| k.to_lowercase().contains("token")));
    }
}
