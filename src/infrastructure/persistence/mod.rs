//! Store implementations.
//!
//! Concrete implementations of the domain repository traits.
//!
//! # URL stores
//!
//! - [`SqliteUrlStore`] - Embedded SQLite file (default)
//! - [`MongoUrlStore`] - MongoDB collection
//!
//! # Counter stores
//!
//! - [`PgCounterStore`] - PostgreSQL, shared by every `alias-gen` instance
//! - [`SqliteCounterStore`] - SQLite, for single-node deployments and tests

pub mod mongo_url_store;
pub mod pg_counter_store;
pub mod sqlite_counter_store;
pub mod sqlite_url_store;

pub use mongo_url_store::MongoUrlStore;
pub use pg_counter_store::PgCounterStore;
pub use sqlite_counter_store::SqliteCounterStore;
pub use sqlite_url_store::{SqliteUrlStore, open_sqlite_pool};

use std::sync::Arc;
use std::time::Duration;

use crate::domain::repositories::{CounterStore, StoreError};

/// Connects to the counter store named by `url`.
///
/// `postgres://` and `postgresql://` URLs select [`PgCounterStore`]; `sqlite:`
/// URLs select [`SqliteCounterStore`].
///
/// # Errors
///
/// Returns [`StoreError::Internal`] for any other scheme.
pub async fn connect_counter_store(
    url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<Arc<dyn CounterStore>, StoreError> {
    if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        Ok(Arc::new(
            PgCounterStore::connect(url, max_connections, acquire_timeout).await?,
        ))
    } else if url.starts_with("sqlite:") {
        Ok(Arc::new(
            SqliteCounterStore::connect(url, max_connections).await?,
        ))
    } else {
        Err(StoreError::Internal(format!(
            "unsupported counter database URL: {}",
            url
        )))
    }
}
