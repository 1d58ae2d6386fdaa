//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

// Re-exports
pub use authenticate::AuthenticateUseCase;
pub use config::AuthConfig;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpUseCase};
