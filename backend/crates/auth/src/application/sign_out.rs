//! Sign Out Use Case
//!
//! Clears the authenticated user's token.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> SignOutUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, mut user: User) -> AuthResult<()> {
        user.revoke_token();
        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "User signed out");
        Ok(())
    }
}
