//! Session Middleware
//!
//! Middleware for requiring a valid access token on protected routes.
//! Verification is purely cryptographic (signature + expiry); no store
//! lookup happens here. The verified user id is placed in request
//! extensions for handlers to extract as [`CurrentUser`].

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::config::SessionConfig;
use crate::application::token::{TokenIssuer, TokenKind};
use crate::domain::value_object::user_id::UserId;
use crate::error::AccountError;

/// Middleware state
#[derive(Clone)]
pub struct SessionMiddlewareState {
    pub config: Arc<SessionConfig>,
    pub issuer: Arc<TokenIssuer>,
}

/// Verified caller identity, stored in request extensions
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub user_id: UserId,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .copied()
            .ok_or_else(|| AccountError::Unauthorized.into_response())
    }
}

/// Middleware that requires a valid access token
pub async fn require_session(
    State(state): State<SessionMiddlewareState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_access_token(req.headers(), &state.config)
        .ok_or_else(|| AccountError::Unauthorized.into_response())?;

    let claims = state
        .issuer
        .verify(&token, TokenKind::Access)
        .map_err(|e| e.into_response())?;

    req.extensions_mut().insert(CurrentUser {
        user_id: claims.user_id,
    });

    Ok(next.run(req).await)
}

/// Access token from the session cookie, else from `Authorization: Bearer`
fn extract_access_token(headers: &HeaderMap, config: &SessionConfig) -> Option<String> {
    if let Some(token) = platform::cookie::extract_cookie(headers, &config.access_cookie_name) {
        return Some(token);
    }

    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn state() -> SessionMiddlewareState {
        let config = Arc::new(SessionConfig::development());
        let issuer = Arc::new(TokenIssuer::new(&config).unwrap());
        SessionMiddlewareState { config, issuer }
    }

    #[test]
    fn test_token_from_cookie_wins_over_header() {
        let state = state();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("accessToken=from-cookie"),
        );
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer from-header"),
        );

        assert_eq!(
            extract_access_token(&headers, &state.config),
            Some("from-cookie".to_string())
        );
    }

    #[test]
    fn test_token_from_bearer_header() {
        let state = state();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );

        assert_eq!(
            extract_access_token(&headers, &state.config),
            Some("abc.def.ghi".to_string())
        );
    }

    #[test]
    fn test_no_token_sources() {
        let state = state();
        assert_eq!(extract_access_token(&HeaderMap::new(), &state.config), None);
    }
}
