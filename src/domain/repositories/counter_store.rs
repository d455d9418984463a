//! Repository trait for the alias counter.

use crate::domain::repositories::StoreError;
use async_trait::async_trait;

/// A single persisted counter that only moves forward.
///
/// The counter row is seeded with `0`, so the first [`CounterStore::increment`]
/// returns `1`.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCounterStore`] - PostgreSQL
/// - [`crate::infrastructure::persistence::SqliteCounterStore`] - SQLite
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Atomically increments the counter and returns the new value.
    ///
    /// Must be a single storage-level read-modify-write so that concurrent
    /// callers never observe the same value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the store cannot be reached.
    async fn increment(&self) -> Result<u64, StoreError>;
}
