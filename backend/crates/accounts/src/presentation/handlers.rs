//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::response::{AppendHeaders, IntoResponse};
use std::path::PathBuf;
use std::sync::Arc;

use kernel::response::ApiResponse;

use crate::application::config::SessionConfig;
use crate::application::token::{TokenIssuer, TokenPair};
use crate::application::{
    ChangePasswordInput, ChangePasswordUseCase, LoginInput, LoginUseCase, LogoutUseCase,
    RefreshSessionUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::repository::{AssetStore, CredentialRepository, UserRepository};
use crate::error::{AccountError, AccountResult};
use crate::presentation::dto::{
    ChangePasswordRequest, LoginRequest, LoginResponse, RefreshRequest, RegisterRequest,
    TokenPairResponse, UserResponse,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for account handlers
pub struct AccountsAppState<R, A>
where
    R: UserRepository + CredentialRepository + Clone + Send + Sync + 'static,
    A: AssetStore + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub assets: Arc<A>,
    pub config: Arc<SessionConfig>,
    pub issuer: Arc<TokenIssuer>,
}

impl<R, A> Clone for AccountsAppState<R, A>
where
    R: UserRepository + CredentialRepository + Clone + Send + Sync + 'static,
    A: AssetStore + Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            assets: self.assets.clone(),
            config: self.config.clone(),
            issuer: self.issuer.clone(),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/v1/users/register
pub async fn register<R, A>(
    State(state): State<AccountsAppState<R, A>>,
    Json(req): Json<RegisterRequest>,
) -> AccountResult<impl IntoResponse>
where
    R: UserRepository + CredentialRepository + Clone + Send + Sync + 'static,
    A: AssetStore + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.assets.clone(),
    );

    let input = RegisterInput {
        username: req.username,
        email: req.email,
        full_name: req.full_name,
        password: req.password,
        avatar_path: req.avatar.map(PathBuf::from),
        cover_image_path: req.cover_image.map(PathBuf::from),
    };

    let user = use_case.execute(input).await?;

    Ok(ApiResponse::created(
        UserResponse::from(&user),
        "User registered successfully",
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/v1/users/login
pub async fn login<R, A>(
    State(state): State<AccountsAppState<R, A>>,
    Json(req): Json<LoginRequest>,
) -> AccountResult<impl IntoResponse>
where
    R: UserRepository + CredentialRepository + Clone + Send + Sync + 'static,
    A: AssetStore + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.repo.clone(), state.issuer.clone());

    let input = LoginInput {
        username: req.username,
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    // Tokens travel both as cookies and in the body, so browser and
    // non-browser clients use the same endpoint.
    let cookies = session_cookies(&state.config, &output.tokens);

    Ok((
        cookies,
        ApiResponse::ok(
            LoginResponse {
                user: UserResponse::from(&output.user),
                access_token: output.tokens.access_token,
                refresh_token: output.tokens.refresh_token,
            },
            "User logged in successfully",
        ),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/v1/users/logout
pub async fn logout<R, A>(
    State(state): State<AccountsAppState<R, A>>,
    current_user: CurrentUser,
) -> AccountResult<impl IntoResponse>
where
    R: UserRepository + CredentialRepository + Clone + Send + Sync + 'static,
    A: AssetStore + Clone + Send + Sync + 'static,
{
    let use_case = LogoutUseCase::new(state.repo.clone());
    use_case.execute(&current_user.user_id).await?;

    Ok((
        clear_session_cookies(&state.config),
        ApiResponse::ok(serde_json::Value::Null, "User logged out successfully"),
    ))
}

// ============================================================================
// Refresh
// ============================================================================

/// POST /api/v1/users/refresh-token
///
/// The refresh token is read from the cookie first, then from the JSON
/// body for clients that do not hold cookies.
pub async fn refresh_session<R, A>(
    State(state): State<AccountsAppState<R, A>>,
    headers: HeaderMap,
    body: Option<Json<RefreshRequest>>,
) -> AccountResult<impl IntoResponse>
where
    R: UserRepository + CredentialRepository + Clone + Send + Sync + 'static,
    A: AssetStore + Clone + Send + Sync + 'static,
{
    let from_cookie = platform::cookie::extract_cookie(&headers, &state.config.refresh_cookie_name);
    let from_body = body.and_then(|Json(req)| req.refresh_token);
    let presented = from_cookie.or(from_body);

    let use_case = RefreshSessionUseCase::new(state.repo.clone(), state.issuer.clone());
    let tokens = use_case.execute(presented.as_deref()).await?;

    let cookies = session_cookies(&state.config, &tokens);

    Ok((
        cookies,
        ApiResponse::ok(
            TokenPairResponse {
                access_token: tokens.access_token,
                refresh_token: tokens.refresh_token,
            },
            "Session refreshed successfully",
        ),
    ))
}

// ============================================================================
// Change Password
// ============================================================================

/// POST /api/v1/users/change-password
pub async fn change_password<R, A>(
    State(state): State<AccountsAppState<R, A>>,
    current_user: CurrentUser,
    Json(req): Json<ChangePasswordRequest>,
) -> AccountResult<impl IntoResponse>
where
    R: UserRepository + CredentialRepository + Clone + Send + Sync + 'static,
    A: AssetStore + Clone + Send + Sync + 'static,
{
    let use_case = ChangePasswordUseCase::new(state.repo.clone());

    let input = ChangePasswordInput {
        old_password: req.old_password,
        new_password: req.new_password,
    };

    use_case.execute(&current_user.user_id, input).await?;

    // The refresh session was revoked; drop the cookie with it.
    let cleared = AppendHeaders([(
        header::SET_COOKIE,
        state
            .config
            .cookie
            .build_delete_cookie(&state.config.refresh_cookie_name),
    )]);

    Ok((
        cleared,
        ApiResponse::ok(serde_json::Value::Null, "Password changed successfully"),
    ))
}

// ============================================================================
// Current User
// ============================================================================

/// GET /api/v1/users/current-user
pub async fn current_user<R, A>(
    State(state): State<AccountsAppState<R, A>>,
    current_user: CurrentUser,
) -> AccountResult<impl IntoResponse>
where
    R: UserRepository + CredentialRepository + Clone + Send + Sync + 'static,
    A: AssetStore + Clone + Send + Sync + 'static,
{
    let user = state
        .repo
        .find_by_id(&current_user.user_id)
        .await?
        .ok_or(AccountError::Unauthorized)?;

    Ok(ApiResponse::ok(
        UserResponse::from(&user),
        "Current user fetched successfully",
    ))
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Both session cookies for a fresh token pair
fn session_cookies(
    config: &SessionConfig,
    tokens: &TokenPair,
) -> AppendHeaders<[(header::HeaderName, String); 2]> {
    AppendHeaders([
        (
            header::SET_COOKIE,
            config.cookie.build_set_cookie(
                &config.access_cookie_name,
                &tokens.access_token,
                config.access_ttl_secs(),
            ),
        ),
        (
            header::SET_COOKIE,
            config.cookie.build_set_cookie(
                &config.refresh_cookie_name,
                &tokens.refresh_token,
                config.refresh_ttl_secs(),
            ),
        ),
    ])
}

/// Delete both session cookies
fn clear_session_cookies(
    config: &SessionConfig,
) -> AppendHeaders<[(header::HeaderName, String); 2]> {
    AppendHeaders([
        (
            header::SET_COOKIE,
            config.cookie.build_delete_cookie(&config.access_cookie_name),
        ),
        (
            header::SET_COOKIE,
            config
                .cookie
                .build_delete_cookie(&config.refresh_cookie_name),
        ),
    ])
}
