//! In-Memory Repository Implementation
//!
//! Same contract as the Postgres repository, including the unique email and
//! token rules. Used by tests and when no database is configured.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{access_token::AccessToken, email::Email};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::Validation("email has already been taken".to_string()));
        }

        users.insert(*user.user_id.as_uuid(), user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| &u.email == email).cloned())
    }

    async fn find_by_token(&self, token: &AccessToken) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.token.as_ref() == Some(token))
            .cloned())
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;
        let id = *user.user_id.as_uuid();

        if let Some(token) = &user.token
            && users
                .iter()
                .any(|(other, u)| *other != id && u.token.as_ref() == Some(token))
        {
            return Err(AuthError::Validation("token has already been taken".to_string()));
        }

        let stored = users
            .get_mut(&id)
            .ok_or_else(|| AuthError::NotFound(format!("user {}", user.user_id)))?;
        stored.token = user.token.clone();
        stored.updated_at = user.updated_at;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::{RawPassword, UserPassword};
    use platform::password::HashCost;

    fn user(email: &str) -> User {
        let raw = RawPassword::new("pw".to_string()).unwrap();
        let hash = UserPassword::from_raw(&raw, None, HashCost::interactive()).unwrap();
        User::new(Email::new(email).unwrap(), hash)
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.create(&user("a@example.com")).await.unwrap();
        let err = repo.create(&user("a@example.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_persists_token_only() {
        let repo = InMemoryUserRepository::new();
        let mut u = user("a@example.com");
        repo.create(&u).await.unwrap();

        let token = u.issue_token().clone();
        repo.update(&u).await.unwrap();

        let found = repo.find_by_token(&token).await.unwrap().unwrap();
        assert_eq!(found.user_id, u.user_id);
    }

    #[tokio::test]
    async fn test_update_unknown_user_is_not_found() {
        let repo = InMemoryUserRepository::new();
        let err = repo.update(&user("a@example.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::NotFound(_)));
    }
}
