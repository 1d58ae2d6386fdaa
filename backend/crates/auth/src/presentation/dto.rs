//! API DTOs (Data Transfer Objects)
//!
//! Request bodies nest credentials under `credentials`; responses nest the
//! public user view under `user`. Field names are snake_case on the wire.

use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;
use crate::domain::value_object::access_token::AccessToken;

// ============================================================================
// Sign Up
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct SignUpRequest {
    pub credentials: Option<SignUpCredentials>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignUpCredentials {
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

// ============================================================================
// Sign In
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct SignInRequest {
    pub credentials: Option<SignInCredentials>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignInCredentials {
    pub email: Option<String>,
    pub password: Option<String>,
}

// ============================================================================
// User view
// ============================================================================

/// Public projection of a user. The password hash has no field here.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: String,
    pub email: String,
    /// Only present in the sign-in response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl UserView {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.user_id.to_string(),
            email: user.email.to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: &AccessToken) -> Self {
        self.token = Some(token.as_str().to_string());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserEnvelope {
    pub user: UserView,
}

impl From<UserView> for UserEnvelope {
    fn from(user: UserView) -> Self {
        Self { user }
    }
}
