//! User Entity
//!
//! A registered account. Holds the credential hash and at most one live
//! access token; signing in replaces the token, signing out clears it.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    access_token::AccessToken, email::Email, user_id::UserId, user_password::UserPassword,
};

#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Unique sign-in key (trimmed, lower-cased)
    pub email: Email,
    /// Argon2id PHC string, never serialized
    pub password_hash: UserPassword,
    /// Current bearer token; `None` while signed out
    pub token: Option<AccessToken>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new, signed-out user
    pub fn new(email: Email, password_hash: UserPassword) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            email,
            password_hash,
            token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Issue a fresh token, replacing any previous one
    pub fn issue_token(&mut self) -> &AccessToken {
        self.updated_at = Utc::now();
        self.token.insert(AccessToken::generate())
    }

    /// Drop the current token so it no longer authenticates
    pub fn revoke_token(&mut self) {
        self.token = None;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::RawPassword;
    use platform::password::HashCost;

    fn user() -> User {
        let raw = RawPassword::new("pw".to_string()).unwrap();
        let hash = UserPassword::from_raw(&raw, None, HashCost::interactive()).unwrap();
        User::new(Email::new("a@b.co").unwrap(), hash)
    }

    #[test]
    fn test_new_user_is_signed_out() {
        let u = user();
        assert!(u.token.is_none());
        assert_eq!(u.created_at, u.updated_at);
    }

    #[test]
    fn test_issue_token_replaces_previous() {
        let mut u = user();
        let first = u.issue_token().clone();
        let second = u.issue_token().clone();
        assert_ne!(first, second);
        assert_eq!(u.token.as_ref(), Some(&second));
    }

    #[test]
    fn test_revoke_token() {
        let mut u = user();
        u.issue_token();
        u.revoke_token();
        assert!(u.token.is_none());
    }
}
