//! Favorites manager
//!
//! Owns the in-memory favorites list and keeps it consistent with one backing
//! store at a time. The remote store is preferred; the first remote failure
//! snapshots the list into the local cache and the rest of the session runs
//! against the cache. Nothing here returns an error to the caller.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use super::view;
use crate::error::Result;
use crate::models::{NewQuote, Quote, QuoteId};
use crate::store::{FavoriteStore, LocalFavoriteStore};
use crate::Error;

/// How long a front end shows its "saved" acknowledgment
pub const SAVED_ACKNOWLEDGMENT: Duration = Duration::from_millis(1500);

/// The store the manager currently persists to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backing {
    /// Remote store; pinned state is the record field
    Remote,
    /// Local cache; pinned state is the cached pinned-id set
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    Created,
    AlreadySaved,
}

/// Result of [`FavoritesManager::save`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub quote: Quote,
    pub status: SaveStatus,
}

impl SaveOutcome {
    pub fn is_created(&self) -> bool {
        self.status == SaveStatus::Created
    }

    /// Acknowledgment window to show, only for fresh saves
    pub fn acknowledgment(&self) -> Option<Duration> {
        self.is_created().then_some(SAVED_ACKNOWLEDGMENT)
    }
}

/// A mutation issued against whichever store is active
#[derive(Clone, Copy)]
enum StoreOp<'a> {
    Create(&'a NewQuote),
    Delete(&'a QuoteId),
    TogglePin(&'a QuoteId),
}

impl StoreOp<'_> {
    /// Operations on client-minted records never reach the remote store
    fn is_local_only(&self) -> bool {
        match self {
            Self::Create(_) => false,
            Self::Delete(id) | Self::TogglePin(id) => id.is_local(),
        }
    }

    async fn run(self, store: &dyn FavoriteStore) -> Result<Option<Quote>> {
        match self {
            Self::Create(candidate) => store.create(candidate).await.map(Some),
            Self::Delete(id) => store.delete(id).await.map(|()| None),
            Self::TogglePin(id) => store.toggle_pin(id).await.map(Some),
        }
    }
}

/// Session state for saved quotes
pub struct FavoritesManager {
    remote: Option<Arc<dyn FavoriteStore>>,
    local: LocalFavoriteStore,
    backing: Backing,
    favorites: Vec<Quote>,
}

impl FavoritesManager {
    /// Manager preferring `remote` when given, always able to fall back to `local`
    pub fn new(remote: Option<Arc<dyn FavoriteStore>>, local: LocalFavoriteStore) -> Self {
        let backing = if remote.is_some() {
            Backing::Remote
        } else {
            Backing::Local
        };
        Self {
            remote,
            local,
            backing,
            favorites: Vec::new(),
        }
    }

    /// Manager without a remote store
    pub fn local_only(local: LocalFavoriteStore) -> Self {
        Self::new(None, local)
    }

    pub const fn backing(&self) -> Backing {
        self.backing
    }

    /// The in-memory list, in store order
    pub fn favorites(&self) -> &[Quote] {
        &self.favorites
    }

    pub fn find(&self, id: &QuoteId) -> Option<&Quote> {
        self.favorites.iter().find(|quote| &quote.id == id)
    }

    pub fn is_saved(&self, content: &str, author: &str) -> bool {
        self.find_saved(content, author).is_some()
    }

    /// Load the list from the remote store, falling back to the local cache
    ///
    /// Also re-selects the backing for the rest of the session.
    pub async fn load(&mut self) -> &[Quote] {
        if let Some(remote) = self.remote.clone() {
            match remote.list().await {
                Ok(quotes) => {
                    tracing::debug!("Loaded {} favorites from remote store", quotes.len());
                    self.backing = Backing::Remote;
                    self.favorites = dedupe_ids(quotes);
                    return &self.favorites;
                }
                Err(error) => {
                    tracing::warn!("Remote store unavailable, using local cache: {error}");
                }
            }
        }

        self.backing = Backing::Local;
        let quotes = self.local.list().await.unwrap_or_else(|error| {
            tracing::warn!("Failed to read favorites from local cache: {error}");
            Vec::new()
        });
        tracing::debug!("Loaded {} favorites from local cache", quotes.len());
        self.favorites = dedupe_ids(quotes);
        &self.favorites
    }

    /// Save a quote unless one with the same content and author is already saved
    pub async fn save(&mut self, candidate: NewQuote) -> SaveOutcome {
        if let Some(existing) = self.find_saved(&candidate.content, &candidate.author) {
            return SaveOutcome {
                quote: existing.clone(),
                status: SaveStatus::AlreadySaved,
            };
        }

        let quote = match self.apply(StoreOp::Create(&candidate)).await {
            Ok(Some(stored)) => stored,
            outcome => {
                if let Err(error) = outcome {
                    tracing::error!("Saved quote for this session only: {error}");
                }
                Quote::from_new(QuoteId::local(), &candidate)
            }
        };

        self.favorites.push(quote.clone());
        SaveOutcome {
            quote,
            status: SaveStatus::Created,
        }
    }

    /// Remove a saved quote; returns `false` when `id` is not in the list
    pub async fn remove(&mut self, id: &QuoteId) -> bool {
        let Some(position) = self.position(id) else {
            tracing::debug!("Ignoring removal of unknown quote {id}");
            return false;
        };

        // Optimistic: the list drops the quote whatever the store reports
        self.favorites.remove(position);
        if let Err(error) = self.apply(StoreOp::Delete(id)).await {
            tracing::error!("Removed quote {id} for this session only: {error}");
        }
        true
    }

    /// Flip a quote's pinned flag; returns the new state, `None` for unknown ids
    pub async fn toggle_pin(&mut self, id: &QuoteId) -> Option<bool> {
        let position = self.position(id)?;

        let pinned = match self.apply(StoreOp::TogglePin(id)).await {
            Ok(Some(updated)) => updated.pinned,
            outcome => {
                if let Err(error) = outcome {
                    tracing::error!("Toggled pin on {id} for this session only: {error}");
                }
                !self.favorites[position].pinned
            }
        };

        self.favorites[position].pinned = pinned;
        Some(pinned)
    }

    /// Favorites carrying `tag`, or all of them
    pub fn filter_by_tag(&self, tag: Option<&str>) -> Vec<Quote> {
        view::filter_by_tag(&self.favorites, tag)
    }

    /// Filtered favorites in display order (pinned first)
    pub fn displayed(&self, tag: Option<&str>) -> Vec<Quote> {
        view::order_for_display(self.filter_by_tag(tag))
    }

    pub fn tag_counts(&self) -> Vec<(String, usize)> {
        view::tag_counts(&self.favorites)
    }

    fn find_saved(&self, content: &str, author: &str) -> Option<&Quote> {
        self.favorites
            .iter()
            .find(|quote| quote.matches(content, author))
    }

    fn position(&self, id: &QuoteId) -> Option<usize> {
        self.favorites.iter().position(|quote| &quote.id == id)
    }

    fn active_remote(&self) -> Option<Arc<dyn FavoriteStore>> {
        match self.backing {
            Backing::Remote => self.remote.clone(),
            Backing::Local => None,
        }
    }

    async fn apply(&mut self, op: StoreOp<'_>) -> Result<Option<Quote>> {
        if let Some(remote) = self.active_remote().filter(|_| !op.is_local_only()) {
            match op.run(remote.as_ref()).await {
                Ok(outcome) => return Ok(outcome),
                Err(error) => self.fall_back_to_local(&error),
            }
        }
        op.run(&self.local).await
    }

    /// Switch to the local cache, seeding it with the current list
    fn fall_back_to_local(&mut self, error: &Error) {
        tracing::warn!("Remote store unavailable, switching favorites to local cache: {error}");
        self.backing = Backing::Local;
        if let Err(error) = self.local.replace_all(&self.favorites) {
            tracing::error!("Failed to copy favorites into local cache: {error}");
        }
    }
}

fn dedupe_ids(quotes: Vec<Quote>) -> Vec<Quote> {
    let mut seen = HashSet::new();
    quotes
        .into_iter()
        .filter(|quote| seen.insert(quote.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cache::{KeyValueStore, LocalCache, MemoryKeyValueStore, FAVORITES_KEY};

    /// Remote store double that can be switched offline
    #[derive(Default)]
    struct FakeRemote {
        quotes: Mutex<Vec<Quote>>,
        offline: AtomicBool,
        calls: AtomicUsize,
        next_id: AtomicUsize,
    }

    impl FakeRemote {
        fn with_quotes(quotes: Vec<Quote>) -> Arc<Self> {
            let remote = Self::default();
            *remote.quotes.lock().unwrap() = quotes;
            Arc::new(remote)
        }

        fn offline() -> Arc<Self> {
            let remote = Self::default();
            remote.offline.store(true, Ordering::SeqCst);
            Arc::new(remote)
        }

        fn go_offline(&self) {
            self.offline.store(true, Ordering::SeqCst);
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn stored(&self) -> Vec<Quote> {
            self.quotes.lock().unwrap().clone()
        }

        fn check(&self) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.offline.load(Ordering::SeqCst) {
                Err(Error::RemoteUnavailable("connection refused".into()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl FavoriteStore for FakeRemote {
        async fn list(&self) -> Result<Vec<Quote>> {
            self.check()?;
            Ok(view::order_for_display(self.stored()))
        }

        async fn create(&self, quote: &NewQuote) -> Result<Quote> {
            self.check()?;
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            let created = Quote::from_new(QuoteId::from(format!("srv-{id}")), quote);
            self.quotes.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn delete(&self, id: &QuoteId) -> Result<()> {
            self.check()?;
            self.quotes.lock().unwrap().retain(|quote| &quote.id != id);
            Ok(())
        }

        async fn toggle_pin(&self, id: &QuoteId) -> Result<Quote> {
            self.check()?;
            let mut quotes = self.quotes.lock().unwrap();
            let quote = quotes
                .iter_mut()
                .find(|quote| &quote.id == id)
                .ok_or_else(|| Error::RemoteUnavailable("HTTP 404".into()))?;
            quote.pinned = !quote.pinned;
            Ok(quote.clone())
        }
    }

    fn candidate(content: &str, author: &str) -> NewQuote {
        NewQuote::new(content, author, Vec::new()).unwrap()
    }

    fn remote_quote(id: &str, content: &str, pinned: bool) -> Quote {
        Quote {
            pinned,
            ..Quote::from_new(QuoteId::from(id), &candidate(content, "Anon"))
        }
    }

    fn manager_with(remote: Option<Arc<FakeRemote>>) -> (FavoritesManager, LocalCache) {
        let cache = LocalCache::in_memory();
        let remote = remote.map(|remote| remote as Arc<dyn FavoriteStore>);
        let manager = FavoritesManager::new(remote, LocalFavoriteStore::new(cache.clone()));
        (manager, cache)
    }

    /// Cache contents as the manager would load them
    async fn cached(cache: &LocalCache) -> Vec<Quote> {
        LocalFavoriteStore::new(cache.clone()).list().await.unwrap()
    }

    #[tokio::test]
    async fn load_prefers_remote() {
        let remote = FakeRemote::with_quotes(vec![remote_quote("srv-a", "a", false)]);
        let (mut manager, cache) = manager_with(Some(remote));
        cache
            .set_favorites(&[remote_quote("local-x", "stale", false)])
            .unwrap();

        let loaded = manager.load().await.to_vec();
        assert_eq!(loaded, vec![remote_quote("srv-a", "a", false)]);
        assert_eq!(manager.backing(), Backing::Remote);
    }

    #[tokio::test]
    async fn load_falls_back_to_cache() {
        let (mut manager, cache) = manager_with(Some(FakeRemote::offline()));
        cache
            .set_favorites(&[remote_quote("local-x", "cached", false)])
            .unwrap();

        let loaded = manager.load().await.to_vec();
        assert_eq!(loaded, vec![remote_quote("local-x", "cached", false)]);
        assert_eq!(manager.backing(), Backing::Local);
    }

    #[tokio::test]
    async fn load_with_corrupt_cache_is_empty() {
        let store = Arc::new(MemoryKeyValueStore::new());
        store.set(FAVORITES_KEY, "not json").unwrap();
        let mut manager =
            FavoritesManager::local_only(LocalFavoriteStore::new(LocalCache::new(store)));

        assert!(manager.load().await.is_empty());
    }

    #[tokio::test]
    async fn load_drops_duplicate_ids() {
        let (mut manager, cache) = manager_with(None);
        cache
            .set_favorites(&[
                remote_quote("local-1", "first", false),
                remote_quote("local-1", "again", false),
            ])
            .unwrap();

        assert_eq!(manager.load().await.len(), 1);
        assert_eq!(manager.favorites()[0].content, "first");
    }

    #[tokio::test]
    async fn save_is_idempotent_by_value() {
        let remote = FakeRemote::with_quotes(Vec::new());
        let (mut manager, _cache) = manager_with(Some(remote.clone()));
        manager.load().await;

        let first = manager.save(candidate("Be water.", "Bruce Lee")).await;
        let second = manager.save(candidate("Be water.", "Bruce Lee")).await;

        assert_eq!(first.status, SaveStatus::Created);
        assert_eq!(second.status, SaveStatus::AlreadySaved);
        assert_eq!(first.quote, second.quote);
        assert_eq!(manager.favorites().len(), 1);
        assert_eq!(remote.stored().len(), 1);
    }

    #[tokio::test]
    async fn save_adopts_remote_id() {
        let remote = FakeRemote::with_quotes(Vec::new());
        let (mut manager, cache) = manager_with(Some(remote));
        manager.load().await;

        let outcome = manager.save(candidate("Stay hungry.", "Steve Jobs")).await;
        assert_eq!(outcome.quote.id, QuoteId::from("srv-0"));
        assert_eq!(manager.favorites(), &[outcome.quote]);
        assert!(cache.favorites().unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_offline_persists_to_cache() {
        let (mut manager, cache) = manager_with(Some(FakeRemote::offline()));
        assert!(manager.load().await.is_empty());

        let outcome = manager.save(candidate("Be water.", "Bruce Lee")).await;

        assert!(outcome.quote.id.is_local());
        assert!(!outcome.quote.pinned);
        assert_eq!(outcome.quote.content, "Be water.");
        assert_eq!(outcome.quote.author, "Bruce Lee");
        assert_eq!(manager.favorites(), std::slice::from_ref(&outcome.quote));
        assert_eq!(cache.favorites().unwrap(), vec![outcome.quote]);
    }

    #[tokio::test]
    async fn acknowledgment_only_for_fresh_saves() {
        let (mut manager, _cache) = manager_with(None);
        manager.load().await;

        let created = manager.save(candidate("a", "b")).await;
        let repeated = manager.save(candidate("a", "b")).await;
        assert_eq!(created.acknowledgment(), Some(SAVED_ACKNOWLEDGMENT));
        assert_eq!(repeated.acknowledgment(), None);
    }

    #[tokio::test]
    async fn remote_failure_mid_session_keeps_cache_consistent() {
        let remote = FakeRemote::with_quotes(vec![
            remote_quote("srv-a", "a", true),
            remote_quote("srv-b", "b", false),
        ]);
        let (mut manager, cache) = manager_with(Some(remote.clone()));
        manager.load().await;
        remote.go_offline();

        let saved = manager.save(candidate("c", "Anon")).await;
        assert!(saved.quote.id.is_local());
        assert_eq!(manager.backing(), Backing::Local);
        assert_eq!(cached(&cache).await, manager.favorites());
        assert_eq!(cache.pinned_ids().unwrap(), vec![QuoteId::from("srv-a")]);

        assert!(manager.remove(&QuoteId::from("srv-b")).await);
        assert_eq!(cached(&cache).await, manager.favorites());

        assert_eq!(manager.toggle_pin(&saved.quote.id).await, Some(true));
        assert_eq!(cached(&cache).await, manager.favorites());

        // Remaining calls went to the cache only
        let calls_after_fallback = remote.calls();
        manager.toggle_pin(&QuoteId::from("srv-a")).await;
        assert_eq!(remote.calls(), calls_after_fallback);
    }

    #[tokio::test]
    async fn remove_while_remote_fails_survives_reload() {
        let remote = FakeRemote::with_quotes(vec![
            remote_quote("srv-a", "a", false),
            remote_quote("srv-b", "b", false),
        ]);
        let (mut manager, cache) = manager_with(Some(remote.clone()));
        manager.load().await;
        remote.go_offline();

        assert!(manager.remove(&QuoteId::from("srv-a")).await);
        assert_eq!(manager.favorites(), &[remote_quote("srv-b", "b", false)]);

        let mut reloaded = FavoritesManager::new(
            Some(remote as Arc<dyn FavoriteStore>),
            LocalFavoriteStore::new(cache),
        );
        assert_eq!(
            reloaded.load().await,
            &[remote_quote("srv-b", "b", false)]
        );
    }

    #[tokio::test]
    async fn remove_unknown_id_is_noop() {
        let remote = FakeRemote::with_quotes(vec![remote_quote("srv-a", "a", false)]);
        let (mut manager, cache) = manager_with(Some(remote.clone()));
        manager.load().await;
        let calls = remote.calls();

        assert!(!manager.remove(&QuoteId::from("missing")).await);

        assert_eq!(manager.favorites().len(), 1);
        assert_eq!(remote.calls(), calls);
        assert_eq!(remote.stored().len(), 1);
        assert!(cache.favorites().unwrap().is_empty());
    }

    #[tokio::test]
    async fn toggle_round_trip_remote() {
        let remote = FakeRemote::with_quotes(vec![remote_quote("srv-a", "a", false)]);
        let (mut manager, _cache) = manager_with(Some(remote.clone()));
        manager.load().await;
        let id = QuoteId::from("srv-a");

        assert_eq!(manager.toggle_pin(&id).await, Some(true));
        assert!(remote.stored()[0].pinned);
        assert_eq!(manager.toggle_pin(&id).await, Some(false));
        assert!(!manager.favorites()[0].pinned);
        assert!(!remote.stored()[0].pinned);
    }

    #[tokio::test]
    async fn toggle_round_trip_local() {
        let (mut manager, cache) = manager_with(None);
        manager.load().await;
        let id = manager.save(candidate("a", "b")).await.quote.id;

        assert_eq!(manager.toggle_pin(&id).await, Some(true));
        assert_eq!(cache.pinned_ids().unwrap(), vec![id.clone()]);
        assert_eq!(manager.toggle_pin(&id).await, Some(false));
        assert!(cache.pinned_ids().unwrap().is_empty());
        assert!(!manager.favorites()[0].pinned);
    }

    #[tokio::test]
    async fn toggle_falls_back_to_pinned_set() {
        let remote = FakeRemote::with_quotes(vec![remote_quote("srv-a", "a", false)]);
        let (mut manager, cache) = manager_with(Some(remote.clone()));
        manager.load().await;
        remote.go_offline();

        assert_eq!(manager.toggle_pin(&QuoteId::from("srv-a")).await, Some(true));
        assert_eq!(cache.pinned_ids().unwrap(), vec![QuoteId::from("srv-a")]);
        assert!(cache.favorites().unwrap().iter().all(|quote| !quote.pinned));
        assert!(!remote.stored()[0].pinned);
    }

    #[tokio::test]
    async fn toggle_unknown_id_is_none() {
        let (mut manager, _cache) = manager_with(None);
        manager.load().await;
        assert_eq!(manager.toggle_pin(&QuoteId::from("missing")).await, None);
    }

    #[tokio::test]
    async fn local_ids_never_reach_remote_store() {
        let remote = FakeRemote::with_quotes(vec![
            remote_quote("local-stray", "stray", false),
            remote_quote("srv-a", "a", false),
        ]);
        let (mut manager, _cache) = manager_with(Some(remote.clone()));
        manager.load().await;
        let calls = remote.calls();

        let stray = QuoteId::from("local-stray");
        assert_eq!(manager.toggle_pin(&stray).await, Some(true));
        assert!(manager.remove(&stray).await);
        assert_eq!(remote.calls(), calls);
        assert_eq!(manager.backing(), Backing::Remote);
        assert_eq!(remote.stored().len(), 2);

        assert_eq!(manager.toggle_pin(&QuoteId::from("srv-a")).await, Some(true));
        assert_eq!(remote.calls(), calls + 1);
    }

    #[tokio::test]
    async fn displayed_filters_then_orders() {
        let (mut manager, _cache) = manager_with(None);
        manager.load().await;
        let tagged = |content: &str| {
            NewQuote::new(content, "Anon", vec!["wisdom".to_string()]).unwrap()
        };

        manager.save(tagged("first")).await;
        manager.save(candidate("untagged", "Anon")).await;
        let last = manager.save(tagged("last")).await.quote;
        manager.toggle_pin(&last.id).await;

        let shown = manager
            .displayed(Some("wisdom"))
            .into_iter()
            .map(|quote| quote.content)
            .collect::<Vec<_>>();
        assert_eq!(shown, vec!["last", "first"]);
        assert_eq!(manager.tag_counts(), vec![("wisdom".to_string(), 2)]);
        assert!(manager.is_saved("untagged", "Anon"));
    }
}
