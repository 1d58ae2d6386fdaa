//! User Password Value Object
//!
//! Domain wrappers around `platform::password`.
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//! use platform::password::HashCost;
//!
//! let raw = RawPassword::new("correct horse".to_string()).unwrap();
//! let hashed = UserPassword::from_raw(&raw, None, HashCost::interactive()).unwrap();
//! assert!(hashed.verify(&raw, None));
//! ```

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{
    ClearTextPassword, HashCost, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Memory is automatically zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate user input
    ///
    /// Errors are 422s with a message naming the rule that failed.
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooLong { max, actual } => AppError::unprocessable(format!(
                "Password must be at most {} characters (got {})",
                max, actual
            )),
            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::unprocessable("Password cannot be empty")
            }
            PasswordPolicyError::InvalidCharacter => {
                AppError::unprocessable("Password contains invalid characters")
            }
        })?;

        Ok(Self(clear_text))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password for database storage (Argon2id PHC string)
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a validated raw password
    pub fn from_raw(
        raw: &RawPassword,
        pepper: Option<&[u8]>,
        cost: HashCost,
    ) -> Result<Self, PasswordHashError> {
        raw.inner().hash(pepper, cost).map(Self)
    }

    /// Restore from the stored PHC string
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string)
            .map_err(|e| AppError::internal("Invalid password hash in store").with_source(e))?;

        Ok(Self(hashed))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Constant-time verification of a raw password against this hash
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}
