//! PostgreSQL implementation of the alias counter.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::domain::repositories::{CounterStore, StoreError};

/// Counter kept in the single-row `counter` table.
///
/// The increment is one `UPDATE ... RETURNING` statement; the row lock taken
/// by the update serialises concurrent callers, including callers in other
/// `alias-gen` processes sharing the database.
pub struct PgCounterStore {
    pool: PgPool,
}

impl PgCounterStore {
    /// Creates a counter store over an already migrated pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to PostgreSQL, applies the counter migration and seeds the row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the database cannot be reached.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations/postgres")
            .run(&pool)
            .await
            .map_err(|e| StoreError::Internal(format!("Counter migration failed: {}", e)))?;

        info!("✓ Connected to counter database");
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl CounterStore for PgCounterStore {
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
