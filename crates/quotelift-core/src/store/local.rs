//! Favorite store over the local cache

use async_trait::async_trait;

use super::FavoriteStore;
use crate::cache::LocalCache;
use crate::error::{Error, Result};
use crate::models::{NewQuote, Quote, QuoteId};

/// `FavoriteStore` persisted in the local cache
///
/// Pinned state lives only in the pinned-id entry. Records are written with
/// `pinned: false` and [`FavoriteStore::list`] projects the flag back from
/// the set.
#[derive(Clone)]
pub struct LocalFavoriteStore {
    cache: LocalCache,
}

impl LocalFavoriteStore {
    pub const fn new(cache: LocalCache) -> Self {
        Self { cache }
    }

    pub const fn cache(&self) -> &LocalCache {
        &self.cache
    }

    /// Overwrite the cache with `quotes`, taking pinned state from the records
    pub fn replace_all(&self, quotes: &[Quote]) -> Result<()> {
        let pinned = quotes
            .iter()
            .filter(|quote| quote.pinned)
            .map(|quote| quote.id.clone())
            .collect::<Vec<_>>();
        let stored = quotes.iter().map(unpinned).collect::<Vec<_>>();

        self.cache.set_favorites(&stored)?;
        self.cache.set_pinned_ids(&pinned)
    }

    fn load(&self) -> Result<(Vec<Quote>, Vec<QuoteId>)> {
        Ok((self.cache.favorites()?, self.cache.pinned_ids()?))
    }
}

fn unpinned(quote: &Quote) -> Quote {
    Quote {
        pinned: false,
        ..quote.clone()
    }
}

#[async_trait]
impl FavoriteStore for LocalFavoriteStore {
    async fn list(&self) -> Result<Vec<Quote>> {
        let (favorites, pinned) = self.load()?;
        Ok(favorites
            .into_iter()
            .map(|mut quote| {
                quote.pinned = pinned.contains(&quote.id);
                quote
            })
            .collect())
    }

    async fn create(&self, quote: &NewQuote) -> Result<Quote> {
        let mut favorites = self.cache.favorites()?;
        let created = Quote::from_new(QuoteId::local(), quote);
        favorites.push(created.clone());
        self.cache.set_favorites(&favorites)?;
        tracing::debug!("Saved quote {} to local cache", created.id);
        Ok(created)
    }

    async fn delete(&self, id: &QuoteId) -> Result<()> {
        let (mut favorites, mut pinned) = self.load()?;
        favorites.retain(|quote| &quote.id != id);
        pinned.retain(|pinned_id| pinned_id != id);
        self.cache.set_favorites(&favorites)?;
        self.cache.set_pinned_ids(&pinned)
    }

    async fn toggle_pin(&self, id: &QuoteId) -> Result<Quote> {
        let (favorites, mut pinned) = self.load()?;
        let mut quote = favorites
            .into_iter()
            .find(|quote| &quote.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        if let Some(position) = pinned.iter().position(|pinned_id| pinned_id == id) {
            pinned.remove(position);
            quote.pinned = false;
        } else {
            pinned.push(id.clone());
            quote.pinned = true;
        }
        self.cache.set_pinned_ids(&pinned)?;
        Ok(quote)
    }
}
