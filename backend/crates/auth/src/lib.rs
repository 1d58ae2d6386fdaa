//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - User entity, value objects, repository trait
//! - `application/` - Use cases (sign up, sign in, sign out, authenticate)
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, bearer middleware, router
//!
//! ## Features
//! - Sign up with email + password (confirmation required)
//! - Sign in issues an opaque bearer token, replacing any previous one
//! - Sign out clears the token
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - Tokens are 128 bits from the OS CSPRNG and do not expire
//! - Unknown email and wrong password produce the same 401

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryUserRepository, PgUserRepository};
pub use presentation::{AuthAppState, auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
