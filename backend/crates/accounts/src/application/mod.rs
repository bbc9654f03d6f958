//! Application Layer
//!
//! Use cases and application services.

pub mod change_password;
pub mod config;
pub mod login;
pub mod logout;
pub mod refresh_session;
pub mod register;
pub mod token;

// Re-exports
pub use change_password::{ChangePasswordInput, ChangePasswordUseCase};
pub use config::SessionConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use refresh_session::RefreshSessionUseCase;
pub use register::{RegisterInput, RegisterUseCase};
pub use token::{TokenIssuer, TokenKind, TokenPair};
