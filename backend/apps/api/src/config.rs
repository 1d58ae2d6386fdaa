//! Environment configuration for the server binary

use anyhow::Context;
use axum::http::HeaderValue;
use std::str::FromStr;

const DEFAULT_PORT: u16 = 4741;
const DEFAULT_CLIENT_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub client_origins: Vec<HeaderValue>,
    /// `None` runs on the in-memory store
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub password_pepper: Option<String>,
    pub ably_api_key: Option<String>,
    pub ably_client_id: Option<String>,
    pub ably_token_ttl_ms: Option<u64>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let client_origins = get("CLIENT_ORIGIN")
            .unwrap_or_else(|| DEFAULT_CLIENT_ORIGIN.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .with_context(|| format!("CLIENT_ORIGIN contains an invalid origin: {origin}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self {
            port: parse_or(get("PORT"), "PORT", DEFAULT_PORT)?,
            client_origins,
            database_url: get("DATABASE_URL"),
            database_max_connections: parse_or(
                get("DATABASE_MAX_CONNECTIONS"),
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_MAX_CONNECTIONS,
            )?,
            password_pepper: get("PASSWORD_PEPPER"),
            ably_api_key: get("ABLY_API_KEY"),
            ably_client_id: get("ABLY_CLIENT_ID"),
            ably_token_ttl_ms: get("ABLY_TOKEN_TTL_MS")
                .map(|v| parse_value(&v, "ABLY_TOKEN_TTL_MS"))
                .transpose()?,
        })
    }
}

fn parse_value<T>(raw: &str, key: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("{key} must be a number, got {raw:?}"))
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.map_or(Ok(default), |v| parse_value(&v, key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.port, 4741);
        assert_eq!(config.client_origins, vec!["http://localhost:3000"]);
        assert!(config.database_url.is_none());
        assert_eq!(config.database_max_connections, 5);
        assert!(config.ably_api_key.is_none());
        assert!(config.ably_token_ttl_ms.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("PORT", "8080"),
            ("CLIENT_ORIGIN", "https://a.example, https://b.example"),
            ("DATABASE_URL", "postgres://localhost/auth"),
            ("ABLY_TOKEN_TTL_MS", "3600000"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(
            config.client_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/auth"));
        assert_eq!(config.ably_token_ttl_ms, Some(3_600_000));
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = config(&[("DATABASE_URL", "  "), ("PORT", "")]).unwrap();
        assert!(config.database_url.is_none());
        assert_eq!(config.port, 4741);
    }

    #[test]
    fn test_invalid_numbers_fail() {
        let err = config(&[("PORT", "http")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
        assert!(config(&[("DATABASE_MAX_CONNECTIONS", "-1")]).is_err());
    }
}
