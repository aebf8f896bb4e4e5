//! Quote model

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{Error, Result};

const LOCAL_ID_PREFIX: &str = "local-";

/// A unique identifier for a saved quote
///
/// Stores may hand out string or integer ids; both are kept as text and
/// always serialized as a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawQuoteId", into = "String")]
pub struct QuoteId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawQuoteId {
    Text(String),
    Integer(i64),
}

impl From<RawQuoteId> for QuoteId {
    fn from(raw: RawQuoteId) -> Self {
        match raw {
            RawQuoteId::Text(value) => Self(value),
            RawQuoteId::Integer(value) => Self(value.to_string()),
        }
    }
}

impl From<QuoteId> for String {
    fn from(id: QuoteId) -> Self {
        id.0
    }
}

impl QuoteId {
    /// Create a new server-side ID using UUID v7 (time-sortable)
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Create a new ID for a record that only exists in the local cache
    #[must_use]
    pub fn local() -> Self {
        Self(format!("{LOCAL_ID_PREFIX}{}", Uuid::now_v7()))
    }

    /// Whether this ID was minted client-side
    pub fn is_local(&self) -> bool {
        self.0.starts_with(LOCAL_ID_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for QuoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A saved (or freshly fetched) quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Unique identifier, assigned by whichever store persisted the record
    pub id: QuoteId,
    /// Quote body
    pub content: String,
    /// Quote author
    pub author: String,
    /// Free-form labels, in provider order
    #[serde(default)]
    pub tags: Vec<String>,
    /// Manual priority flag
    #[serde(default)]
    pub pinned: bool,
}

impl Quote {
    /// Build an unpinned record from a save candidate
    #[must_use]
    pub fn from_new(id: QuoteId, candidate: &NewQuote) -> Self {
        Self {
            id,
            content: candidate.content.clone(),
            author: candidate.author.clone(),
            tags: candidate.tags.clone(),
            pinned: false,
        }
    }

    /// Value identity used to keep saves idempotent
    pub fn matches(&self, content: &str, author: &str) -> bool {
        self.content == content && self.author == author
    }

    /// Exact tag membership
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|candidate| candidate == tag)
    }

    /// Candidate carrying this quote's content, for saving a fetched quote
    pub fn to_new_quote(&self) -> Result<NewQuote> {
        NewQuote::new(&self.content, &self.author, self.tags.clone())
    }
}

/// A quote the user asked to save, before any store assigned it an ID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuote {
    pub content: String,
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewQuote {
    /// Create a save candidate; content and author must not be blank
    pub fn new(
        content: impl Into<String>,
        author: impl Into<String>,
        tags: Vec<String>,
    ) -> Result<Self> {
        let content = content.into();
        let author = author.into();
        if content.trim().is_empty() {
            return Err(Error::InvalidInput("quote content must not be empty".into()));
        }
        if author.trim().is_empty() {
            return Err(Error::InvalidInput("quote author must not be empty".into()));
        }
        Ok(Self {
            content,
            author,
            tags,
        })
    }

    /// Re-check an already deserialized candidate
    pub fn validate(&self) -> Result<()> {
        Self::new(&self.content, &self.author, Vec::new()).map(|_| ())
    }
}
