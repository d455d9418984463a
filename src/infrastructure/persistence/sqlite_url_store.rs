//! SQLite implementation of the URL store.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use tracing::{debug, info};

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::{AliasReuse, StoreError, UrlStore};

/// Opens a pooled SQLite database and applies the embedded migrations.
///
/// `url` is either a plain file path or a `sqlite:` URL. The file is created
/// if it does not exist yet.
pub async fn open_sqlite_pool(url: &str, max_connections: u32) -> Result<SqlitePool, StoreError> {
    let base = if url.starts_with("sqlite:") {
        SqliteConnectOptions::from_str(url)?
    } else {
        SqliteConnectOptions::new().filename(url)
    };
    let options = base
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations/sqlite")
        .run(&pool)
        .await
        .map_err(|e| StoreError::Internal(format!("SQLite migration failed: {}", e)))?;

    Ok(pool)
}

/// URL store backed by a single SQLite file.
///
/// The `urls.alias` column carries a UNIQUE constraint, so concurrent saves of
/// the same alias are arbitrated by SQLite itself.
pub struct SqliteUrlStore {
    pool: SqlitePool,
    reuse: AliasReuse,
}

impl SqliteUrlStore {
    /// Creates a store over an already migrated pool.
    pub fn new(pool: SqlitePool, reuse: AliasReuse) -> Self {
        Self { pool, reuse }
    }

    /// Opens (or creates) the database at `path` and migrates it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the file cannot be opened and
    /// [`StoreError::Internal`] if the migrations fail.
    pub async fn connect(
        path: &str,
        max_connections: u32,
        reuse: AliasReuse,
    ) -> Result<Self, StoreError> {
        let pool = open_sqlite_pool(path, max_connections).await?;
        info!("✓ Opened SQLite store at {} ({:?} alias reuse)", path, reuse);
        Ok(Self::new(pool, reuse))
    }
}

#[async_trait]
impl UrlStore for SqliteUrlStore {
    async fn save(&self, record: &UrlRecord) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO urls (alias, target) VALUES (?, ?)")
            .bind(&record.alias)
            .bind(&record.target)
            .execute(&self.pool)
            .await?;

        debug!("Stored {} -> {}", record.alias, record.target);
        Ok(())
    }

    async fn get(&self, alias: &str) -> Result<String, StoreError> {
        sqlx::query_scalar::<_, String>(
            "SELECT target FROM urls WHERE alias = ? AND deleted_at IS NULL",
        )
        .bind(alias)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, alias: &str) -> Result<(), StoreError> {
        let query = match self.reuse {
            AliasReuse::Allow => "DELETE FROM urls WHERE alias = ? AND deleted_at IS NULL",
            AliasReuse::Retire => {
                "UPDATE urls SET deleted_at = CURRENT_TIMESTAMP \
                 WHERE alias = ? AND deleted_at IS NULL"
            }
        };

        let result = sqlx::query(query).bind(alias).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
