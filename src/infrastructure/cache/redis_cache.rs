//! Redis-backed cache implementation.

use std::time::Duration;

use super::service::{CacheError, CacheResult, UrlCache};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisError, aio::ConnectionManager};
use tracing::{debug, info};

/// Redis cache for alias lookups.
///
/// Uses a `ConnectionManager` shared by all request tasks; it reconnects on
/// its own after connection loss. Every entry is written with the same TTL.
pub struct RedisCache {
    client: ConnectionManager,
    ttl_seconds: u64,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `ttl` - Lifetime of every cached entry (`CACHE_TTL_SECONDS`)
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Unavailable`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, ttl: Duration) -> CacheResult<Self> {
        info!(
            "Connecting to Redis at {}",
            crate::config::mask_connection_string(redis_url)
        );

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::Unavailable(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::Unavailable(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::Unavailable(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            ttl_seconds: ttl.as_secs().max(1),
            key_prefix: "url:".to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, alias: &str) -> String {
        format!("{}{}", self.key_prefix, alias)
    }
}

fn unavailable(op: &str, alias: &str, e: RedisError) -> CacheError {
    CacheError::Unavailable(format!("Redis {} failed for {}: {}", op, alias, e))
}

#[async_trait]
impl UrlCache for RedisCache {
    async fn get(&self, alias: &str) -> CacheResult<Option<String>> {
        let key = self.build_key(alias);
        let mut conn = self.client.clone();

        let cached = conn
            .get::<_, Option<String>>(&key)
            .await
            .map_err(|e| unavailable("GET", alias, e))?;

        match &cached {
            Some(target) => debug!("Cache HIT: {} -> {}", alias, target),
            None => debug!("Cache MISS: {}", alias),
        }

        Ok(cached)
    }

    async fn save(&self, alias: &str, target: &str) -> CacheResult<()> {
        let key = self.build_key(alias);
        let mut conn = self.client.clone();

        conn.set_ex::<_, _, ()>(&key, target, self.ttl_seconds)
            .await
            .map_err(|e| unavailable("SET", alias, e))?;

        debug!(
            "Cache SET: {} -> {} (TTL: {}s)",
            alias, target, self.ttl_seconds
        );
        Ok(())
    }

    async fn delete(&self, alias: &str) -> CacheResult<()> {
        let key = self.build_key(alias);
        let mut conn = self.client.clone();

        let deleted = conn
            .del::<_, i32>(&key)
            .await
            .map_err(|e| unavailable("DEL", alias, e))?;

        if deleted > 0 {
            debug!("Cache INVALIDATE: {}", alias);
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
