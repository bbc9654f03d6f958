//! Infrastructure Layer
//!
//! Concrete implementations of the domain repository traits.

pub mod assets;
pub mod postgres;

// Re-exports
pub use assets::CdnAssetStore;
pub use postgres::PgAccountRepository;
