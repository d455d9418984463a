//! No-op cache implementation for disabled caching.

use super::service::{CacheResult, UrlCache};
use async_trait::async_trait;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// Used when no Redis endpoint is configured or Redis is unreachable at
/// startup. Every lookup misses and every write succeeds without storing data.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlCache for NullCache {
    async fn get(&self, _alias: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn save(&self, _alias: &str, _target: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn delete(&self, _alias: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_cache_always_misses() {
        let cache = NullCache::new();

        cache.save("abc", "https://example.com").await.unwrap();
        assert_eq!(cache.get("abc").await.unwrap(), None);
        assert!(cache.delete("abc").await.is_ok());
        assert!(cache.health_check().await);
    }
}
