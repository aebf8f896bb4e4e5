use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use quotelift_core::cache::{FileKeyValueStore, LocalCache};
use quotelift_core::config::ClientConfig;
use quotelift_core::store::{FavoriteStore, LocalFavoriteStore, RemoteStoreClient};
use quotelift_core::{Backing, FavoritesManager, Quote, QuoteId};
use serde::Serialize;

use crate::error::CliError;

const DATA_DIR_VAR: &str = "QUOTELIFT_DATA_DIR";
const SHORT_ID_LEN: usize = 13;

/// Where a command persists and which endpoints it talks to
#[derive(Debug, Clone)]
pub struct CliContext {
    pub data_dir: PathBuf,
    pub config: ClientConfig,
}

impl CliContext {
    /// Flags win over the environment
    pub fn resolve(api_url: Option<String>, data_dir: Option<PathBuf>) -> Result<Self, CliError> {
        let config = ClientConfig::from_env()?.with_api_base_url(api_url)?;
        Ok(Self {
            data_dir: resolve_data_dir(data_dir)?,
            config,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct QuoteListItem {
    pub id: String,
    pub content: String,
    pub author: String,
    pub tags: Vec<String>,
    pub pinned: bool,
}

#[derive(Debug, Serialize)]
pub struct TagCountItem {
    pub tag: String,
    pub count: usize,
}

pub fn resolve_data_dir(cli_data_dir: Option<PathBuf>) -> Result<PathBuf, CliError> {
    cli_data_dir
        .or_else(|| env::var_os(DATA_DIR_VAR).map(PathBuf::from))
        .map_or_else(default_data_dir, Ok)
}

pub fn default_data_dir() -> Result<PathBuf, CliError> {
    dirs::data_dir()
        .map(|dir| dir.join("quotelift"))
        .ok_or_else(|| {
            CliError::Config(format!(
                "Failed to resolve a data directory; pass --data-dir or set {DATA_DIR_VAR}"
            ))
        })
}

/// Manager over the configured backend and the file cache in the data dir
pub fn build_manager(ctx: &CliContext) -> Result<FavoritesManager, CliError> {
    let cache = LocalCache::new(Arc::new(FileKeyValueStore::new(ctx.data_dir.clone())));
    let local = LocalFavoriteStore::new(cache);

    let remote = ctx
        .config
        .api_base_url
        .as_deref()
        .map(RemoteStoreClient::new)
        .transpose()?
        .map(|client| Arc::new(client) as Arc<dyn FavoriteStore>);

    Ok(FavoritesManager::new(remote, local))
}

/// Build the manager and load the saved list
pub async fn open_favorites(ctx: &CliContext) -> Result<FavoritesManager, CliError> {
    let mut manager = build_manager(ctx)?;
    let loaded = manager.load().await.len();
    tracing::debug!("Loaded {loaded} favorites ({:?} backing)", manager.backing());
    warn_if_degraded(ctx, &manager);
    Ok(manager)
}

pub fn warn_if_degraded(ctx: &CliContext, manager: &FavoritesManager) {
    if ctx.config.api_base_url.is_some() && manager.backing() == Backing::Local {
        eprintln!("Backend unreachable; using the local favorites cache");
    }
}

pub fn normalize_quote_identifier(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyQuoteId)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Match a full id first, then a unique id prefix
pub fn resolve_favorite(query: &str, favorites: &[Quote]) -> Result<Quote, CliError> {
    let query = normalize_quote_identifier(query)?;
    let exact = QuoteId::from(query.as_str());
    if let Some(quote) = favorites.iter().find(|quote| quote.id == exact) {
        return Ok(quote.clone());
    }

    let matching = favorites
        .iter()
        .filter(|quote| quote.id.as_str().starts_with(&query))
        .collect::<Vec<_>>();

    match matching.as_slice() {
        [] => Err(CliError::QuoteNotFound(query)),
        [quote] => Ok((*quote).clone()),
        many => {
            let options = many
                .iter()
                .take(3)
                .map(|quote| short_id(&quote.id))
                .collect::<Vec<_>>()
                .join(", ");

            Err(CliError::AmbiguousQuoteId(format!(
                "ID prefix '{query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

pub fn resolve_quote_content(content_parts: &[String]) -> Result<String, CliError> {
    normalize_content(&content_parts.join(" ")).ok_or(CliError::EmptyContent)
}

pub fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn short_id(id: &QuoteId) -> String {
    // Local ids share a prefix, keep enough of the uuid to tell them apart
    let len = if id.is_local() {
        SHORT_ID_LEN + 6
    } else {
        SHORT_ID_LEN
    };
    id.as_str().chars().take(len).collect()
}

pub fn format_quote_lines(quotes: &[Quote]) -> Vec<String> {
    quotes
        .iter()
        .map(|quote| {
            let marker = if quote.pinned { "*" } else { " " };
            let preview = quote_preview(&quote.content, 60);
            let tags = render_tags(&quote.tags);
            let line = format!(
                "{:<19} {marker} \"{preview}\" - {}",
                short_id(&quote.id),
                quote.author
            );

            if tags.is_empty() {
                line
            } else {
                format!("{line}  {tags}")
            }
        })
        .collect()
}

/// Full quote block, as shown by `quotelift quote`
pub fn format_quote(quote: &Quote) -> String {
    let mut block = format!("\"{}\"\n  - {}", quote.content.trim(), quote.author);
    let tags = render_tags(&quote.tags);
    if !tags.is_empty() {
        block.push_str("\n  ");
        block.push_str(&tags);
    }
    block
}

pub fn quote_to_list_item(quote: &Quote) -> QuoteListItem {
    QuoteListItem {
        id: quote.id.to_string(),
        content: quote.content.clone(),
        author: quote.author.clone(),
        tags: quote.tags.clone(),
        pinned: quote.pinned,
    }
}

pub fn quote_preview(content: &str, max_chars: usize) -> String {
    let collapsed = content.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn render_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!("#{tag}"))
        .collect::<Vec<String>>()
        .join(" ")
}
