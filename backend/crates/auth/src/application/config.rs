//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::sync::OnceLock;

use platform::password::HashCost;

use crate::domain::value_object::user_password::{RawPassword, UserPassword};

const DUMMY_PASSWORD: &str = "unknown-account-placeholder";

/// Auth application configuration
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Argon2id cost used for new hashes
    pub hash_cost: HashCost,
    /// Verified against when the email is unknown, built on first use
    pub(crate) dummy_hash: OnceLock<Option<UserPassword>>,
}

impl AuthConfig {
    /// Create config for development and tests (cheap hashing, no pepper)
    pub fn development() -> Self {
        Self {
            password_pepper: None,
            hash_cost: HashCost::interactive(),
            dummy_hash: OnceLock::new(),
        }
    }

    pub fn with_pepper(mut self, pepper: impl Into<Vec<u8>>) -> Self {
        let pepper = pepper.into();
        self.password_pepper = (!pepper.is_empty()).then_some(pepper);
        self
    }

    /// Hash with the configured cost and pepper that matches no account
    ///
    /// `None` only if the configured cost is rejected by Argon2.
    pub fn dummy_hash(&self) -> Option<&UserPassword> {
        self.dummy_hash
            .get_or_init(|| {
                let raw = RawPassword::new(DUMMY_PASSWORD.to_string()).ok()?;
                UserPassword::from_raw(&raw, self.pepper(), self.hash_cost).ok()
            })
            .as_ref()
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
