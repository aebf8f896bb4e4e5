//! quotelift-core - Core library for QuoteLift
//!
//! This crate contains the quote model, the favorites persistence layer
//! (remote store client, local cache and the manager reconciling the two) and
//! the random quote source used by the CLI and the backend.

pub mod cache;
pub mod config;
pub mod error;
pub mod favorites;
pub mod models;
pub mod source;
pub mod store;
pub mod util;

pub use error::{Error, Result};
pub use favorites::{Backing, FavoritesManager, SaveOutcome, SaveStatus};
pub use models::{NewQuote, Quote, QuoteId};
