//! Access Token Value Object
//!
//! Opaque bearer credential: 16 random bytes rendered as 32 lowercase hex
//! characters. Stored as-is on the user row, so lookup is a plain equality
//! match.

use std::fmt;

use platform::crypto::random_hex;

/// Number of random bytes behind each token
pub const ACCESS_TOKEN_BYTES: usize = 16;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AccessToken(String);

impl AccessToken {
    /// Generate a fresh token from the OS CSPRNG
    pub fn generate() -> Self {
        Self(random_hex(ACCESS_TOKEN_BYTES))
    }

    /// Accept a client-presented token only if it has the issued shape
    pub fn parse(raw: &str) -> Option<Self> {
        let well_formed = raw.len() == ACCESS_TOKEN_BYTES * 2
            && raw.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        well_formed.then(|| Self(raw.to_string()))
    }

    /// Wrap a token read from the store
    pub fn from_string(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(4).collect();
        write!(f, "AccessToken({prefix}…)")
    }
}
