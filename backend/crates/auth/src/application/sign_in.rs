//! Sign In Use Case
//!
//! Verifies credentials and issues a fresh bearer token.
//!
//! Read, verify and write are separate store calls. Two concurrent sign-ins
//! for the same user both succeed and the later write wins.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    access_token::AccessToken, email::Email, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    pub user: User,
    pub token: AccessToken,
}

/// Sign in use case
pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        // Every way of not matching a user collapses into the same error
        let email = input
            .email
            .and_then(|e| Email::new(e).ok())
            .ok_or(AuthError::BadCredentials)?;
        let raw_password = input
            .password
            .and_then(|p| RawPassword::new(p).ok())
            .ok_or(AuthError::BadCredentials)?;

        let Some(mut user) = self.user_repo.find_by_email(&email).await? else {
            // Unknown email costs one verify, like a wrong password
            if let Some(dummy) = self.config.dummy_hash() {
                let _ = dummy.verify(&raw_password, self.config.pepper());
            }
            return Err(AuthError::BadCredentials);
        };

        if !user.password_hash.verify(&raw_password, self.config.pepper()) {
            return Err(AuthError::BadCredentials);
        }

        let token = user.issue_token().clone();
        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(SignInOutput { user, token })
    }
}
