//! Database connection management

use libsql::{Builder, Connection};
use std::path::Path;

use super::{migrations, DbResult};

/// Database wrapper for a single libSQL connection
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open a local database at the given path, creating it if it doesn't exist
    ///
    /// Runs migrations automatically. `:memory:` opens a private in-memory
    /// database.
    pub async fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        let db = Builder::new_local(&path_str).build().await?;
        let conn = db.connect()?;

        let database = Self { conn };
        database.configure(path_str != ":memory:").await?;
        database.migrate().await?;
        Ok(database)
    }

    /// Open an in-memory database (useful for testing)
    pub async fn open_in_memory() -> DbResult<Self> {
        Self::open(":memory:").await
    }

    async fn configure(&self, on_disk: bool) -> DbResult<()> {
        if on_disk {
            self.conn
                .execute("PRAGMA journal_mode = WAL;", ())
                .await
                .ok();
            self.conn
                .execute("PRAGMA synchronous = NORMAL;", ())
                .await
                .ok();
        }
        self.conn
            .execute("PRAGMA busy_timeout = 5000;", ())
            .await
            .ok();
        Ok(())
    }

    async fn migrate(&self) -> DbResult<()> {
        migrations::run(&self.conn).await
    }

    /// Get a reference to the underlying connection
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}
