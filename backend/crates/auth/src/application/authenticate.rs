//! Authenticate Use Case
//!
//! Resolves a presented bearer token to the user holding it.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::access_token::AccessToken;
use crate::error::AuthResult;

pub struct AuthenticateUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> AuthenticateUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// `Ok(None)` means "no identity": malformed or unknown token.
    /// Store failures still propagate.
    pub async fn execute(&self, presented: &str) -> AuthResult<Option<User>> {
        let Some(token) = AccessToken::parse(presented) else {
            return Ok(None);
        };

        self.user_repo.find_by_token(&token).await
    }
}
