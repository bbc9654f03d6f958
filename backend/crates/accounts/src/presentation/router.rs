//! Accounts Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::SessionConfig;
use crate::application::token::TokenIssuer;
use crate::domain::repository::{AssetStore, CredentialRepository, UserRepository};
use crate::error::AccountResult;
use crate::infra::{CdnAssetStore, PgAccountRepository};
use crate::presentation::handlers::{self, AccountsAppState};
use crate::presentation::middleware::{SessionMiddlewareState, require_session};

/// Create the accounts router with the PostgreSQL repository
pub fn accounts_router(
    repo: PgAccountRepository,
    assets: CdnAssetStore,
    config: SessionConfig,
) -> AccountResult<Router> {
    accounts_router_generic(repo, assets, config)
}

/// Create a generic accounts router for any repository implementation
pub fn accounts_router_generic<R, A>(
    repo: R,
    assets: A,
    config: SessionConfig,
) -> AccountResult<Router>
where
    R: UserRepository + CredentialRepository + Clone + Send + Sync + 'static,
    A: AssetStore + Clone + Send + Sync + 'static,
{
    let issuer = Arc::new(TokenIssuer::new(&config)?);
    let config = Arc::new(config);

    let state = AccountsAppState {
        repo: Arc::new(repo),
        assets: Arc::new(assets),
        config: config.clone(),
        issuer: issuer.clone(),
    };

    let middleware_state = SessionMiddlewareState { config, issuer };

    let protected = Router::new()
        .route("/logout", post(handlers::logout::<R, A>))
        .route("/change-password", post(handlers::change_password::<R, A>))
        .route("/current-user", get(handlers::current_user::<R, A>))
        .layer(from_fn_with_state(middleware_state, require_session));

    let router = Router::new()
        .route("/register", post(handlers::register::<R, A>))
        .route("/login", post(handlers::login::<R, A>))
        .route("/refresh-token", post(handlers::refresh_session::<R, A>))
        .merge(protected)
        .with_state(state);

    Ok(router)
}
