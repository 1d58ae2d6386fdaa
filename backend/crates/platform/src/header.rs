//! Request header utilities
//!
//! Parsing helpers for the headers the API cares about.

use axum::http::{HeaderMap, header};
use std::net::IpAddr;

const BEARER_SCHEME: &str = "Bearer";

/// Extract the credential from `Authorization: Bearer <token>`
///
/// The scheme is matched case-insensitively (RFC 7235). Returns `None` when
/// the header is absent, not valid UTF-8, uses another scheme, or carries an
/// empty credential.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, credential) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }

    let credential = credential.trim();
    if credential.is_empty() {
        None
    } else {
        Some(credential)
    }
}

/// Extract client IP address from headers
///
/// Checks X-Forwarded-For header first (for reverse proxy setups),
/// then falls back to direct connection IP.
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first_ip) = xff.split(',').next() {
            if let Ok(ip) = first_ip.trim().parse::<IpAddr>() {
                return Some(ip);
            }
        }
    }
    direct_ip
}
