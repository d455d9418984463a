//! Cache trait and error types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache unavailable: {0}")]
    Unavailable(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Accelerator for alias lookups. Never a source of truth.
///
/// Implementations report failures honestly; it is
/// [`crate::application::services::ResolutionService`] that treats every
/// cache error as a miss and never surfaces it to callers.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with a fixed TTL
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlCache: Send + Sync {
    /// Returns the cached target for an alias.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(target))` on cache hit
    /// - `Ok(None)` on cache miss
    async fn get(&self, alias: &str) -> CacheResult<Option<String>>;

    /// Stores a mapping with the cache's fixed TTL.
    async fn save(&self, alias: &str, target: &str) -> CacheResult<()>;

    /// Removes a mapping. Removing an absent key is not an error.
    async fn delete(&self, alias: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
