//! Ably TokenRequest signing
//!
//! `mac` is base64(HMAC-SHA256(keySecret, signing string)), where the signing
//! string is keyName, ttl, capability, clientId, timestamp and nonce, each
//! followed by `\n`. Absent optional fields contribute an empty line.

use chrono::Utc;
use platform::crypto::{hmac_sha256, random_hex, to_base64};
use serde::Serialize;

use crate::config::{AblyApiKey, RealtimeConfig};
use crate::error::RealtimeResult;

/// 8 random bytes, 16 hex characters
const NONCE_BYTES: usize = 8;

/// Parameters the server fixes on every token request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenParams {
    pub client_id: String,
    pub ttl_ms: Option<u64>,
    pub capability: Option<String>,
}

impl TokenParams {
    /// Build from config; a capability must be valid JSON and is re-serialized
    /// compactly so the signed string matches what Ably parses
    pub fn from_config(config: &RealtimeConfig) -> RealtimeResult<Self> {
        let capability = config
            .capability
            .as_deref()
            .map(|raw| serde_json::from_str::<serde_json::Value>(raw).map(|v| v.to_string()))
            .transpose()?;

        Ok(Self {
            client_id: config.client_id.clone(),
            ttl_ms: config.ttl_ms,
            capability,
        })
    }
}

/// Signed voucher returned to the browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    pub key_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capability: Option<String>,
    pub client_id: String,
    pub timestamp: i64,
    pub nonce: String,
    pub mac: String,
}

impl TokenRequest {
    /// Sign with the current time and a fresh nonce
    pub fn create(key: &AblyApiKey, params: &TokenParams) -> Self {
        Self::sign(
            key,
            params,
            Utc::now().timestamp_millis(),
            random_hex(NONCE_BYTES),
        )
    }

    pub fn sign(key: &AblyApiKey, params: &TokenParams, timestamp: i64, nonce: String) -> Self {
        let ttl = params.ttl_ms.map(|t| t.to_string()).unwrap_or_default();
        let capability = params.capability.as_deref().unwrap_or_default();

        let signing_string = format!(
            "{}\n{}\n{}\n{}\n{}\n{}\n",
            key.key_name(),
            ttl,
            capability,
            params.client_id,
            timestamp,
            nonce
        );
        let mac = to_base64(&hmac_sha256(key.key_secret(), signing_string.as_bytes()));

        Self {
            key_name: key.key_name().to_string(),
            ttl: params.ttl_ms,
            capability: params.capability.clone(),
            client_id: params.client_id.clone(),
            timestamp,
            nonce,
            mac,
        }
    }
}
