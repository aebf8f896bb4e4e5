//! Random quote source backed by the QuoteSlate API.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::DEFAULT_QUOTE_API_URL;
use crate::error::{Error, Result};
use crate::models::{Quote, QuoteId};
use crate::util::{compact_text, is_http_url, normalize_text_option, sanitize};

/// Categories offered up front by the quote picker
pub const FEATURED_CATEGORIES: [&str; 4] = ["inspiration", "motivation", "life", "love"];

/// Full category menu, featured ones first
pub const CATEGORIES: [&str; 31] = [
    "inspiration",
    "motivation",
    "life",
    "love",
    "wisdom",
    "success",
    "leadership",
    "happiness",
    "change",
    "perseverance",
    "mindfulness",
    "growth",
    "courage",
    "gratitude",
    "resilience",
    "friendship",
    "creativity",
    "humility",
    "forgiveness",
    "patience",
    "integrity",
    "self-reflection",
    "empathy",
    "purpose",
    "justice",
    "harmony",
    "knowledge",
    "hope",
    "anger",
    "fear",
    "general",
];

/// Provider of random quotes
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch one random quote, optionally restricted to a category tag
    async fn fetch(&self, category: Option<&str>) -> Result<Quote>;
}

#[derive(Debug, Clone)]
pub struct QuoteSlateClient {
    base_url: String,
    client: reqwest::Client,
}

impl Default for QuoteSlateClient {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_QUOTE_API_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }
}

impl QuoteSlateClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = normalize_text_option(Some(base_url.into()))
            .filter(|url| is_http_url(url))
            .ok_or_else(|| {
                Error::InvalidInput("quote provider URL must include http:// or https://".into())
            })?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        })
    }

    fn random_url(&self) -> String {
        format!("{}/random", self.base_url)
    }
}

#[async_trait]
impl QuoteSource for QuoteSlateClient {
    async fn fetch(&self, category: Option<&str>) -> Result<Quote> {
        let mut request = self
            .client
            .get(self.random_url())
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(category) = category.map(str::trim).filter(|value| !value.is_empty()) {
            request = request.query(&[("tags", category)]);
        }

        let response = request
            .send()
            .await
            .map_err(|error| Error::fetch(sanitize(&error)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::fetch(format!(
                "quote provider returned HTTP {status}: {}",
                compact_text(&body)
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|error| Error::fetch(sanitize(&error)))?;
        parse_quote_response(&body)
    }
}

#[derive(Debug, Deserialize)]
struct QuoteSlateResponse {
    quote: String,
    author: String,
    #[serde(default)]
    tags: Option<Vec<String>>,
    /// Absent ids get a fresh one
    #[serde(default)]
    id: Option<QuoteId>,
}

/// Map a provider payload onto a quote record
pub fn parse_quote_response(body: &str) -> Result<Quote> {
    let payload: QuoteSlateResponse = serde_json::from_str(body)
        .map_err(|error| Error::fetch(format!("invalid quote payload: {error}")))?;
    if payload.quote.trim().is_empty() || payload.author.trim().is_empty() {
        return Err(Error::fetch("quote payload is missing content or author"));
    }

    Ok(Quote {
        id: payload.id.unwrap_or_else(QuoteId::generate),
        content: payload.quote,
        author: payload.author,
        tags: payload.tags.unwrap_or_default(),
        pinned: false,
    })
}
