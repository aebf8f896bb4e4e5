//! Saved quote repository

use chrono::Utc;
use libsql::{params, Connection, Row};
use quotelift_core::{NewQuote, Quote, QuoteId};

use super::{DbError, DbResult};

const SELECT_COLUMNS: &str = "SELECT id, content, author, tags, pinned FROM quotes";

/// Trait for saved quote storage operations (async)
#[allow(async_fn_in_trait)]
pub trait QuoteRepository {
    /// All saved quotes, pinned first, then in insertion order
    async fn list(&self) -> DbResult<Vec<Quote>>;

    /// Persist a new unpinned quote under a fresh id
    async fn create(&self, candidate: &NewQuote) -> DbResult<Quote>;

    /// Delete a quote; returns whether a row was removed
    async fn delete(&self, id: &QuoteId) -> DbResult<bool>;

    /// Flip the pinned flag and return the updated record
    async fn toggle_pin(&self, id: &QuoteId) -> DbResult<Quote>;
}

/// libSQL implementation of `QuoteRepository`
pub struct LibSqlQuoteRepository<'a> {
    conn: &'a Connection,
}

impl<'a> LibSqlQuoteRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    async fn get(&self, id: &QuoteId) -> DbResult<Option<Quote>> {
        let mut rows = self
            .conn
            .query(&format!("{SELECT_COLUMNS} WHERE id = ?"), [id.as_str()])
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(parse_quote(&row)?)),
            None => Ok(None),
        }
    }
}

impl QuoteRepository for LibSqlQuoteRepository<'_> {
    async fn list(&self) -> DbResult<Vec<Quote>> {
        let mut rows = self
            .conn
            .query(
                &format!("{SELECT_COLUMNS} ORDER BY pinned DESC, created_at ASC, rowid ASC"),
                (),
            )
            .await?;

        let mut quotes = Vec::new();
        while let Some(row) = rows.next().await? {
            quotes.push(parse_quote(&row)?);
        }
        Ok(quotes)
    }

    async fn create(&self, candidate: &NewQuote) -> DbResult<Quote> {
        let quote = Quote::from_new(QuoteId::generate(), candidate);
        let tags = serde_json::to_string(&quote.tags)
            .map_err(|error| DbError::Corrupt(error.to_string()))?;

        self.conn
            .execute(
                "INSERT INTO quotes (id, content, author, tags, pinned, created_at)
                 VALUES (?, ?, ?, ?, 0, ?)",
                params![
                    quote.id.as_str(),
                    quote.content.as_str(),
                    quote.author.as_str(),
                    tags,
                    Utc::now().timestamp_millis()
                ],
            )
            .await?;

        tracing::debug!(id = %quote.id, "Saved quote");
        Ok(quote)
    }

    async fn delete(&self, id: &QuoteId) -> DbResult<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM quotes WHERE id = ?", [id.as_str()])
            .await?;
        Ok(removed > 0)
    }

    async fn toggle_pin(&self, id: &QuoteId) -> DbResult<Quote> {
        let updated = self
            .conn
            .execute(
                "UPDATE quotes SET pinned = 1 - pinned WHERE id = ?",
                [id.as_str()],
            )
            .await?;
        if updated == 0 {
            return Err(DbError::NotFound(id.to_string()));
        }

        self.get(id)
            .await?
            .ok_or_else(|| DbError::NotFound(id.to_string()))
    }
}

fn parse_quote(row: &Row) -> DbResult<Quote> {
    let id: String = row.get(0)?;
    let tags: String = row.get(3)?;
    let tags: Vec<String> = serde_json::from_str(&tags)
        .map_err(|error| DbError::Corrupt(format!("tags of {id}: {error}")))?;

    Ok(Quote {
        id: QuoteId::from(id),
        content: row.get(1)?,
        author: row.get(2)?,
        tags,
        pinned: row.get::<i64>(4)? != 0,
    })
}
