//! Repository trait for the authoritative URL store.

use crate::domain::entities::UrlRecord;
use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by persistent stores.
///
/// Shared by [`UrlStore`] and [`crate::domain::repositories::CounterStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// No live record matched the alias.
    #[error("alias not found")]
    NotFound,

    /// The alias is already taken; raised by the storage layer's uniqueness
    /// constraint, never by a prior existence check.
    #[error("alias already exists")]
    AliasConflict,

    /// Connectivity or I/O failure, including an exceeded deadline.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Anything else the backend reported.
    #[error("store error: {0}")]
    Internal(String),
}

/// Persistent, authoritative storage of [`UrlRecord`]s.
///
/// Implementations are shared across request tasks and must be safe to call
/// concurrently. Uniqueness of aliases is enforced by the backend atomically.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteUrlStore`] - Embedded SQLite file
/// - [`crate::infrastructure::persistence::MongoUrlStore`] - MongoDB collection
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlStore: Send + Sync {
    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AliasConflict`] if the alias already exists.
    /// Returns [`StoreError::Unavailable`] on connectivity failures.
    async fn save(&self, record: &UrlRecord) -> Result<(), StoreError>;

    /// Returns the target URL for a live alias.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no live record exists.
    async fn get(&self, alias: &str) -> Result<String, StoreError>;

    /// Deletes the record for an alias.
    ///
    /// Whether the alias becomes available for a later [`UrlStore::save`]
    /// depends on the store's [`AliasReuse`] policy.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if nothing was deleted.
    async fn delete(&self, alias: &str) -> Result<(), StoreError>;

    /// Checks whether the backend is reachable.
    async fn health_check(&self) -> bool;

    /// Releases pooled connections. Called once during shutdown.
    async fn close(&self);
}

/// What happens to an alias after its record is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AliasReuse {
    /// The record is removed and the alias may be saved again.
    #[default]
    Allow,
    /// The record is kept as a tombstone; saving the alias again conflicts.
    Retire,
}

impl AliasReuse {
    pub fn from_flag(allow: bool) -> Self {
        if allow { Self::Allow } else { Self::Retire }
    }
}
