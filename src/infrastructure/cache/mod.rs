//! Caching layer for fast alias lookups.
//!
//! Provides a [`UrlCache`] trait with two implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`NullCache`] - No-op implementation for disabled caching

mod null_cache;
mod redis_cache;
mod service;

pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, UrlCache};

#[cfg(test)]
pub use service::MockUrlCache;
