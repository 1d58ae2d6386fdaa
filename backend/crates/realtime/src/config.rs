//! Realtime Configuration

use std::fmt;
use std::str::FromStr;

use crate::error::RealtimeError;

pub const DEFAULT_CLIENT_ID: &str = "agenciflow-hackathon-client";

/// Parsed Ably API key (`keyName:keySecret`)
#[derive(Clone, PartialEq, Eq)]
pub struct AblyApiKey {
    key_name: String,
    key_secret: String,
}

impl AblyApiKey {
    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    pub(crate) fn key_secret(&self) -> &[u8] {
        self.key_secret.as_bytes()
    }
}

impl FromStr for AblyApiKey {
    type Err = RealtimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, secret) = s.trim().split_once(':').ok_or(RealtimeError::MalformedApiKey)?;
        if name.is_empty() || secret.is_empty() {
            return Err(RealtimeError::MalformedApiKey);
        }

        Ok(Self {
            key_name: name.to_string(),
            key_secret: secret.to_string(),
        })
    }
}

impl fmt::Debug for AblyApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AblyApiKey")
            .field("key_name", &self.key_name)
            .field("key_secret", &"[REDACTED]")
            .finish()
    }
}

/// Token request settings
///
/// The raw key is kept as given; it is parsed per request so a bad key
/// surfaces as a 500 on `/ably-auth` instead of blocking startup.
#[derive(Clone)]
pub struct RealtimeConfig {
    pub api_key: Option<String>,
    pub client_id: String,
    /// Requested token lifetime; Ably's default applies when `None`
    pub ttl_ms: Option<u64>,
    /// Capability JSON; Ably grants the key's full capability when `None`
    pub capability: Option<String>,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            client_id: DEFAULT_CLIENT_ID.to_string(),
            ttl_ms: None,
            capability: None,
        }
    }
}

impl RealtimeConfig {
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn api_key(&self) -> Result<AblyApiKey, RealtimeError> {
        self.api_key
            .as_deref()
            .ok_or(RealtimeError::MissingApiKey)?
            .parse()
    }
}

impl fmt::Debug for RealtimeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RealtimeConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("client_id", &self.client_id)
            .field("ttl_ms", &self.ttl_ms)
            .field("capability", &self.capability)
            .finish()
    }
}
