#![allow(dead_code)]

use async_trait::async_trait;
use shortener::application::services::ResolutionService;
use shortener::domain::alias_generator::AliasGenerator;
use shortener::domain::analytics_worker::AnalyticsDispatcher;
use shortener::domain::deadline::Deadline;
use shortener::domain::entities::ResolvedEvent;
use shortener::domain::repositories::{AliasReuse, UrlStore};
use shortener::infrastructure::cache::{CacheError, CacheResult, NullCache, UrlCache};
use shortener::infrastructure::generator::RandomAliasGenerator;
use shortener::infrastructure::persistence::SqliteUrlStore;
use shortener::state::AppState;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::mpsc;

/// In-process cache with no TTL.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.entries.lock().unwrap().contains_key(alias)
    }

    pub fn insert(&self, alias: &str, target: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(alias.to_string(), target.to_string());
    }
}

#[async_trait]
impl UrlCache for MemoryCache {
    async fn get(&self, alias: &str) -> CacheResult<Option<String>> {
        Ok(self.entries.lock().unwrap().get(alias).cloned())
    }

    async fn save(&self, alias: &str, target: &str) -> CacheResult<()> {
        self.insert(alias, target);
        Ok(())
    }

    async fn delete(&self, alias: &str) -> CacheResult<()> {
        self.entries.lock().unwrap().remove(alias);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Cache whose every call fails.
pub struct FailingCache;

#[async_trait]
impl UrlCache for FailingCache {
    async fn get(&self, _alias: &str) -> CacheResult<Option<String>> {
        Err(CacheError::Unavailable("connection refused".to_string()))
    }

    async fn save(&self, _alias: &str, _target: &str) -> CacheResult<()> {
        Err(CacheError::Unavailable("connection refused".to_string()))
    }

    async fn delete(&self, _alias: &str) -> CacheResult<()> {
        Err(CacheError::Unavailable("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

/// A SQLite store in a scratch directory. Keep the `TempDir` alive for as
/// long as the store is used.
pub async fn sqlite_store(reuse: AliasReuse) -> (TempDir, Arc<SqliteUrlStore>) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.db");
    let store = SqliteUrlStore::connect(path.to_str().unwrap(), 5, reuse)
        .await
        .unwrap();

    (dir, Arc::new(store))
}

/// `sqlite:` URL of a fresh database file inside `dir`.
pub fn sqlite_url(dir: &TempDir, name: &str) -> String {
    format!("sqlite:{}", dir.path().join(name).display())
}

pub fn create_service(
    store: Arc<dyn UrlStore>,
    cache: Arc<dyn UrlCache>,
) -> (Arc<ResolutionService>, mpsc::Receiver<ResolvedEvent>) {
    create_service_with_generator(store, cache, Arc::new(RandomAliasGenerator::default()))
}

pub fn create_service_with_generator(
    store: Arc<dyn UrlStore>,
    cache: Arc<dyn UrlCache>,
    generator: Arc<dyn AliasGenerator>,
) -> (Arc<ResolutionService>, mpsc::Receiver<ResolvedEvent>) {
    let (analytics, rx) = AnalyticsDispatcher::channel(100);
    let service = Arc::new(ResolutionService::new(store, cache, generator, analytics));

    (service, rx)
}

/// Handler state over a fresh SQLite store without a cache.
pub async fn create_test_state() -> (
    TempDir,
    AppState,
    mpsc::Receiver<ResolvedEvent>,
) {
    let (dir, store) = sqlite_store(AliasReuse::Allow).await;
    let (service, rx) = create_service(store, Arc::new(NullCache::new()));

    (dir, AppState::new(service, Duration::from_secs(5)), rx)
}

pub fn deadline() -> Deadline {
    Deadline::after(Duration::from_secs(5))
}
