//! Client configuration.
//!
//! Endpoints used by front ends: the optional favorites backend and the
//! random quote provider. Values come from the environment (or any lookup
//! function, for tests).

use std::collections::HashMap;
use std::env;

use thiserror::Error;

use crate::util::{is_http_url, normalize_text_option};

/// Environment variable naming the favorites backend root
pub const API_URL_VAR: &str = "QUOTELIFT_API_URL";
/// Environment variable overriding the quote provider root
pub const QUOTE_API_URL_VAR: &str = "QUOTELIFT_QUOTE_API_URL";

/// Public quote provider used when no override is configured
pub const DEFAULT_QUOTE_API_URL: &str = "https://quoteslate.vercel.app/api/quotes";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Favorites backend, e.g. `http://localhost:5050/api/quotes`.
    /// `None` runs against the local cache only.
    pub api_base_url: Option<String>,
    pub quote_api_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            quote_api_url: DEFAULT_QUOTE_API_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let values: HashMap<String, String> = env::vars().collect();
        Self::from_lookup(|name| values.get(name).cloned())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_base_url = normalize_text_option(lookup(API_URL_VAR))
            .map(|url| validate_url(API_URL_VAR, &url))
            .transpose()?;
        let quote_api_url = normalize_text_option(lookup(QUOTE_API_URL_VAR))
            .map_or_else(
                || Ok(DEFAULT_QUOTE_API_URL.to_string()),
                |url| validate_url(QUOTE_API_URL_VAR, &url),
            )?;

        Ok(Self {
            api_base_url,
            quote_api_url,
        })
    }

    /// Replace the backend URL, e.g. from a command-line flag
    pub fn with_api_base_url(mut self, url: Option<String>) -> Result<Self, ConfigError> {
        if let Some(url) = normalize_text_option(url) {
            self.api_base_url = Some(validate_url("--api-url", &url)?);
        }
        Ok(self)
    }
}

fn validate_url(name: &str, value: &str) -> Result<String, ConfigError> {
    if is_http_url(value) {
        Ok(value.trim_end_matches('/').to_string())
    } else {
        Err(ConfigError::Invalid(format!(
            "{name} must start with http:// or https://"
        )))
    }
}
