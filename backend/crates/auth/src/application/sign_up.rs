//! Sign Up Use Case
//!
//! Creates a new user account. The new user starts signed out.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<User> {
        // Password problems are bad params; email problems are validation
        // failures, same as a store-level rejection.
        let password = input.password.ok_or(AuthError::BadParams)?;
        if input.password_confirmation.as_deref() != Some(password.as_str()) {
            return Err(AuthError::BadParams);
        }
        let raw_password = RawPassword::new(password).map_err(|_| AuthError::BadParams)?;

        let email = Email::new(input.email.unwrap_or_default())?;

        let password_hash =
            UserPassword::from_raw(&raw_password, self.config.pepper(), self.config.hash_cost)?;

        let user = User::new(email, password_hash);
        self.user_repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            email = %user.email,
            "User signed up"
        );

        Ok(user)
    }
}
