//! Accounts Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database and CDN implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Registration with mandatory avatar upload
//! - Login by username or email, JWT access + refresh pair
//! - Refresh-token rotation with a single live session per user
//! - Password change with session revocation
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Access and refresh tokens signed with independent secrets
//! - Refresh tokens checked byte-for-byte against stored state
//! - Public user projection carries no credential material

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::SessionConfig;
pub use error::{AccountError, AccountResult};
pub use infra::assets::CdnAssetStore;
pub use infra::postgres::PgAccountRepository;
pub use presentation::router::accounts_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgAccountRepository as AccountStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
