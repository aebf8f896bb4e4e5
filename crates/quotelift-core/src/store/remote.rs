//! REST client for the favorites backend

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::FavoriteStore;
use crate::error::{Error, Result};
use crate::models::{NewQuote, Quote, QuoteId};
use crate::util::{compact_text, is_http_url, normalize_text_option, sanitize};

/// HTTP client for the `/api/quotes/saved` REST contract
///
/// Every failure is reported as [`Error::RemoteUnavailable`]; retrying or
/// falling back is the caller's decision.
#[derive(Debug, Clone)]
pub struct RemoteStoreClient {
    base_url: String,
    client: reqwest::Client,
}

impl RemoteStoreClient {
    /// `base_url` is the API root, e.g. `http://localhost:5050/api/quotes`
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = normalize_text_option(Some(base_url.into()))
            .ok_or_else(|| Error::InvalidInput("remote store URL must not be empty".into()))?;
        if !is_http_url(&base_url) {
            return Err(Error::InvalidInput(
                "remote store URL must include http:// or https://".into(),
            ));
        }
        let client = reqwest::Client::builder()
            .build()
            .map_err(|error| Error::InvalidInput(sanitize(&error)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn saved_url(&self) -> String {
        format!("{}/saved", self.base_url)
    }

    fn item_url(&self, id: &QuoteId) -> String {
        format!("{}/saved/{}", self.base_url, urlencoding::encode(id.as_str()))
    }

    async fn send(&self, request: reqwest::RequestBuilder, operation: &str) -> Result<Response> {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|error| {
                Error::remote(format!("{operation} request failed: {}", sanitize(&error)))
            })?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(Error::remote(format!(
            "{operation} failed: {}",
            parse_api_error(status, &body)
        )))
    }

    async fn decode<T: DeserializeOwned>(response: Response, operation: &str) -> Result<T> {
        response.json::<T>().await.map_err(|error| {
            Error::remote(format!(
                "{operation} returned malformed body: {}",
                sanitize(&error)
            ))
        })
    }
}

#[async_trait]
impl FavoriteStore for RemoteStoreClient {
    async fn list(&self) -> Result<Vec<Quote>> {
        tracing::debug!("Listing saved quotes from {}", self.base_url);
        let response = self.send(self.client.get(self.saved_url()), "list").await?;
        Self::decode(response, "list").await
    }

    async fn create(&self, quote: &NewQuote) -> Result<Quote> {
        let request = self.client.post(self.saved_url()).json(quote);
        let response = self.send(request, "create").await?;
        Self::decode(response, "create").await
    }

    async fn delete(&self, id: &QuoteId) -> Result<()> {
        self.send(self.client.delete(self.item_url(id)), "delete")
            .await
            .map(|_| ())
    }

    async fn toggle_pin(&self, id: &QuoteId) -> Result<Quote> {
        let url = format!("{}/pin", self.item_url(id));
        let response = self.send(self.client.put(url), "toggle pin").await?;
        Self::decode(response, "toggle pin").await
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    message: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(message) = payload.error.or(payload.message) {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = compact_text(body);
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", trimmed, status.as_u16())
    }
}
