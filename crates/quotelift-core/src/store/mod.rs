//! Favorite stores
//!
//! One capability, two backings: the remote REST store and the local cache.
//! The favorites manager holds both and switches between them when the
//! remote becomes unreachable.

mod local;
mod remote;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{NewQuote, Quote, QuoteId};

pub use local::LocalFavoriteStore;
pub use remote::RemoteStoreClient;

/// Persistence operations over the saved favorites collection
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// All saved quotes, pinned first
    async fn list(&self) -> Result<Vec<Quote>>;

    /// Persist a new quote and return it with its store-assigned ID
    async fn create(&self, quote: &NewQuote) -> Result<Quote>;

    /// Delete by ID; unknown IDs are tolerated
    async fn delete(&self, id: &QuoteId) -> Result<()>;

    /// Flip the pinned flag and return the updated record
    async fn toggle_pin(&self, id: &QuoteId) -> Result<Quote>;
}
