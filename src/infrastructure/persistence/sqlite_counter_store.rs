//! SQLite implementation of the alias counter.

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::sqlite_url_store::open_sqlite_pool;
use crate::domain::repositories::{CounterStore, StoreError};

/// Counter kept in the single-row `counter` table of a SQLite database.
///
/// Suited to single-node deployments and tests; `UPDATE ... RETURNING`
/// executes under SQLite's write lock, so increments never interleave.
pub struct SqliteCounterStore {
    pool: SqlitePool,
}

impl SqliteCounterStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (or creates) the counter database and seeds the counter row.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        Ok(Self::new(open_sqlite_pool(url, max_connections).await?))
    }
}

#[async_trait]
impl CounterStore for SqliteCounterStore {
    async fn increment(&self) -> Result<u64, StoreError> {
        let value = sqlx::query_scalar::<_, i64>(
            "UPDATE counter SET value = value + 1 WHERE id = 1 RETURNING value",
        )
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::Internal("counter row is missing".to_string()))?;

        u64::try_from(value)
            .map_err(|_| StoreError::Internal(format!("counter value {} is negative", value)))
    }
}
