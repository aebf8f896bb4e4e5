//! Database layer for saved quotes

mod connection;
mod migrations;
mod repository;

use thiserror::Error;

pub use connection::Database;
pub use repository::{LibSqlQuoteRepository, QuoteRepository};

/// Result type alias for database operations
pub type DbResult<T> = std::result::Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sql(#[from] libsql::Error),

    /// A stored row could not be decoded
    #[error("Corrupt row: {0}")]
    Corrupt(String),

    #[error("Quote not found: {0}")]
    NotFound(String),
}
