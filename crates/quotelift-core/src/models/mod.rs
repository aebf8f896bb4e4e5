//! Data models for QuoteLift

mod quote;

pub use quote::{NewQuote, Quote, QuoteId};
