use std::collections::HashMap;
use std::env;

use quotelift_core::util::is_http_url;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: String,
    /// libSQL file path, or `:memory:`
    pub database_path: String,
    /// Single browser origin allowed by CORS; any origin when `None`
    pub cors_origin: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let values: HashMap<String, String> = env::vars().collect();
        Self::from_lookup(|name| values.get(name).cloned())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = value_or_default(&lookup, "QUOTELIFT_API_BIND_ADDR", "127.0.0.1:5050");
        if !bind_addr.contains(':') {
            return Err(ConfigError::Invalid(
                "QUOTELIFT_API_BIND_ADDR must be host:port".to_string(),
            ));
        }

        let database_path = value_or_default(&lookup, "QUOTELIFT_DATABASE_PATH", "quotelift.db");

        let cors_origin = optional_trimmed(&lookup, "QUOTELIFT_CORS_ORIGIN")
            .map(|value| value.trim_end_matches('/').to_string());
        if let Some(origin) = cors_origin.as_deref() {
            if !is_http_url(origin) || http::HeaderValue::from_str(origin).is_err() {
                return Err(ConfigError::Invalid(
                    "QUOTELIFT_CORS_ORIGIN must start with http:// or https://".to_string(),
                ));
            }
        }

        Ok(Self {
            bind_addr,
            database_path,
            cors_origin,
        })
    }

    /// Config for tests: in-memory database, ephemeral port
    pub fn in_memory() -> Self {
        Self {
            bind_addr: "127.0.0.1:0".to_string(),
            database_path: ":memory:".to_string(),
            cors_origin: None,
        }
    }
}

fn value_or_default(lookup: impl Fn(&str) -> Option<String>, name: &str, default: &str) -> String {
    optional_trimmed(lookup, name).unwrap_or_else(|| default.to_string())
}

fn optional_trimmed(lookup: impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        AppConfig::from_lookup(|key| map.get(key).map(|value| (*value).to_string()))
    }

    #[test]
    fn config_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:5050");
        assert_eq!(config.database_path, "quotelift.db");
        assert_eq!(config.cors_origin, None);
    }

    #[test]
    fn config_reads_overrides() {
        let config = config_from(&[
            ("QUOTELIFT_API_BIND_ADDR", "0.0.0.0:8080"),
            ("QUOTELIFT_DATABASE_PATH", ":memory:"),
            ("QUOTELIFT_CORS_ORIGIN", "http://localhost:5175/"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.database_path, ":memory:");
        assert_eq!(config.cors_origin.as_deref(), Some("http://localhost:5175"));
    }

    #[test]
    fn config_rejects_invalid_origin() {
        let err = config_from(&[("QUOTELIFT_CORS_ORIGIN", "localhost:5175")]).unwrap_err();
        assert!(err.to_string().contains("QUOTELIFT_CORS_ORIGIN"));
    }

    #[test]
    fn config_accepts_https_origin() {
        let config =
            config_from(&[("QUOTELIFT_CORS_ORIGIN", "https://quotes.example.com")]).unwrap();
        assert_eq!(config.cors_origin.as_deref(), Some("https://quotes.example.com"));
        assert!(config_from(&[("QUOTELIFT_CORS_ORIGIN", "ftp://quotes.example.com")]).is_err());
    }

    #[test]
    fn config_rejects_bind_addr_without_port() {
        assert!(config_from(&[("QUOTELIFT_API_BIND_ADDR", "localhost")]).is_err());
    }
}
