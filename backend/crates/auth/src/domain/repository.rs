//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in the infra layer.

use crate::domain::entity::user::User;
use crate::domain::value_object::{access_token::AccessToken, email::Email};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user; a taken email is a validation failure
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by normalized email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Find the user currently holding this token
    async fn find_by_token(&self, token: &AccessToken) -> AuthResult<Option<User>>;

    /// Persist token and timestamps of an existing user
    async fn update(&self, user: &User) -> AuthResult<()>;
}
