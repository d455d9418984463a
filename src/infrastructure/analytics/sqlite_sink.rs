//! Analytics sink that persists events to SQLite.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::info;

use crate::domain::analytics::{AnalyticsError, AnalyticsSink};
use crate::domain::entities::ResolvedEvent;
use crate::domain::repositories::StoreError;
use crate::infrastructure::persistence::open_sqlite_pool;

/// Writes each [`ResolvedEvent`] as a row of the `clicks` table.
///
/// The table ships with the SQLite migrations, so it can live in the same
/// file as `urls` or in a database of its own.
pub struct SqliteClickSink {
    pool: SqlitePool,
}

impl SqliteClickSink {
    /// Creates a sink over an already migrated pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (or creates) the click database at `path` and migrates it.
    pub async fn connect(path: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = open_sqlite_pool(path, max_connections).await?;
        info!("✓ Opened SQLite click sink at {}", path);
        Ok(Self::new(pool))
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl AnalyticsSink for SqliteClickSink {
    async fn track(&self, event: ResolvedEvent) -> Result<(), AnalyticsError> {
        sqlx::query(
            r#"
            INSERT INTO clicks (alias, occurred_at, outcome, latency_ms, user_agent, ip, referrer)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&event.alias)
        .bind(event.occurred_at.to_rfc3339())
        .bind(event.outcome.as_str())
        .bind(i64::try_from(event.latency.as_millis()).unwrap_or(i64::MAX))
        .bind(&event.client.user_agent)
        .bind(&event.client.ip)
        .bind(&event.client.referrer)
        .execute(&self.pool)
        .await
        .map_err(|e| AnalyticsError::Rejected(format!("failed to insert click: {}", e)))?;

        Ok(())
    }
}
