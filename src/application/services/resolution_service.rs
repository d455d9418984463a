//! Alias save, resolve and delete orchestration.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::domain::alias_generator::{AliasGenerator, GeneratorError};
use crate::domain::analytics_worker::AnalyticsDispatcher;
use crate::domain::deadline::Deadline;
use crate::domain::entities::{ClientInfo, ResolutionOutcome, ResolvedEvent, UrlRecord};
use crate::domain::repositories::{StoreError, UrlStore};
use crate::infrastructure::cache::{CacheError, UrlCache};

const DEADLINE_EXCEEDED: &str = "request deadline exceeded";

/// Outcome of a failed [`ResolutionService`] operation.
///
/// `NotFound` and `AliasConflict` are meant to be shown to clients as such;
/// every other variant collapses to a generic internal failure at the HTTP
/// boundary.
#[derive(Debug, Error)]
pub enum ShortenerError {
    #[error("alias '{alias}' not found")]
    NotFound { alias: String },

    #[error("alias '{alias}' already exists")]
    AliasConflict { alias: String },

    #[error("failed to generate alias: {0}")]
    GenerationFailed(#[source] GeneratorError),

    #[error("failed to store url: {0}")]
    StorageFailed(#[source] StoreError),

    #[error("internal failure: {0}")]
    Internal(String),
}

/// Coordinates the alias generator, the authoritative store, the cache and
/// the analytics queue.
///
/// # Consistency
///
/// - The store is the single source of truth; every store error decides the
///   outcome of the operation.
/// - Cache errors are never surfaced: they degrade to a miss on reads and are
///   logged and ignored on writes.
/// - Cache hits are trusted without re-checking the store, so a deleted alias
///   may keep resolving from another process's stale entry until its TTL
///   expires.
///
/// All collaborator calls are bounded by the caller's [`Deadline`]; an expired
/// deadline is reported like a connectivity failure of that collaborator.
/// Nothing is retried here.
pub struct ResolutionService {
    store: Arc<dyn UrlStore>,
    cache: Arc<dyn UrlCache>,
    generator: Arc<dyn AliasGenerator>,
    analytics: AnalyticsDispatcher,
}

impl ResolutionService {
    /// Creates a new resolution service.
    pub fn new(
        store: Arc<dyn UrlStore>,
        cache: Arc<dyn UrlCache>,
        generator: Arc<dyn AliasGenerator>,
        analytics: AnalyticsDispatcher,
    ) -> Self {
        Self {
            store,
            cache,
            generator,
            analytics,
        }
    }

    /// Saves `target` under `alias`, generating an alias when none is given.
    ///
    /// An empty alias counts as no alias. The cache is populated after the
    /// store accepted the record; a cache failure does not fail the save.
    ///
    /// # Errors
    ///
    /// - [`ShortenerError::GenerationFailed`] if no alias could be generated;
    ///   nothing is written in that case
    /// - [`ShortenerError::AliasConflict`] if the alias is taken; a fresh alias
    ///   is never generated automatically
    /// - [`ShortenerError::StorageFailed`] if the store is unavailable
    /// - [`ShortenerError::Internal`] for any other store failure
    pub async fn save(
        &self,
        deadline: Deadline,
        target: &str,
        alias: Option<&str>,
    ) -> Result<String, ShortenerError> {
        let alias = match alias.filter(|a| !a.is_empty()) {
            Some(alias) => alias.to_string(),
            None => self.generate_alias(deadline).await?,
        };

        let record = UrlRecord::new(alias, target);

        match bounded(deadline, self.store.save(&record), store_deadline_error).await {
            Ok(()) => {}
            Err(StoreError::AliasConflict) => {
                info!("Alias {} already exists", record.alias);
                return Err(ShortenerError::AliasConflict {
                    alias: record.alias,
                });
            }
            Err(e @ StoreError::Unavailable(_)) => {
                error!("Failed to save {}: {}", record.alias, e);
                return Err(ShortenerError::StorageFailed(e));
            }
            Err(e) => {
                error!("Failed to save {}: {}", record.alias, e);
                return Err(ShortenerError::Internal(e.to_string()));
            }
        }

        if let Err(e) = bounded(
            deadline,
            self.cache.save(&record.alias, &record.target),
            cache_deadline_error,
        )
        .await
        {
            metrics::counter!("cache_errors_total", "op" => "save").increment(1);
            warn!("Failed to cache {} after save: {}", record.alias, e);
        }

        info!("Saved {} -> {}", record.alias, record.target);
        Ok(record.alias)
    }

    /// Resolves an alias to its target URL (cache-aside).
    ///
    /// Every call emits a [`ResolvedEvent`] to the analytics queue without
    /// waiting for it to be delivered.
    ///
    /// # Errors
    ///
    /// - [`ShortenerError::NotFound`] if the store has no live record
    /// - [`ShortenerError::Internal`] for any other store failure
    pub async fn resolve(&self, deadline: Deadline, alias: &str) -> Result<String, ShortenerError> {
        self.resolve_with_client(deadline, alias, ClientInfo::default())
            .await
    }

    /// Same as [`ResolutionService::resolve`], recording `client` on the
    /// emitted event.
    pub async fn resolve_with_client(
        &self,
        deadline: Deadline,
        alias: &str,
        client: ClientInfo,
    ) -> Result<String, ShortenerError> {
        let started = Instant::now();

        let (result, outcome) = self.lookup(deadline, alias).await;

        self.analytics.dispatch(
            ResolvedEvent::new(alias, started.elapsed(), outcome).with_client(client),
        );

        result
    }

    /// Deletes an alias from the store, then evicts it from the cache.
    ///
    /// The cache is only touched once the store confirmed the delete, so an
    /// ambiguous store failure never evicts an entry for a record that may
    /// still exist.
    ///
    /// # Errors
    ///
    /// - [`ShortenerError::NotFound`] if the store had no live record
    /// - [`ShortenerError::Internal`] for any other store failure
    pub async fn delete(&self, deadline: Deadline, alias: &str) -> Result<(), ShortenerError> {
        match bounded(deadline, self.store.delete(alias), store_deadline_error).await {
            Ok(()) => {}
            Err(StoreError::NotFound) => {
                info!("Alias {} not found for delete", alias);
                return Err(ShortenerError::NotFound {
                    alias: alias.to_string(),
                });
            }
            Err(e) => {
                error!("Failed to delete {}: {}", alias, e);
                return Err(ShortenerError::Internal(e.to_string()));
            }
        }

        if let Err(e) = bounded(deadline, self.cache.delete(alias), cache_deadline_error).await {
            metrics::counter!("cache_errors_total", "op" => "delete").increment(1);
            warn!("Failed to evict {} from cache after delete: {}", alias, e);
        }

        info!("Deleted {}", alias);
        Ok(())
    }

    pub fn store(&self) -> &Arc<dyn UrlStore> {
        &self.store
    }

    pub fn cache(&self) -> &Arc<dyn UrlCache> {
        &self.cache
    }

    pub fn analytics(&self) -> &AnalyticsDispatcher {
        &self.analytics
    }

    async fn generate_alias(&self, deadline: Deadline) -> Result<String, ShortenerError> {
        bounded(deadline, self.generator.next_alias(), || {
            GeneratorError::Unavailable(DEADLINE_EXCEEDED.to_string())
        })
        .await
        .map_err(|e| {
            error!("Failed to generate alias: {}", e);
            ShortenerError::GenerationFailed(e)
        })
    }

    async fn lookup(
        &self,
        deadline: Deadline,
        alias: &str,
    ) -> (Result<String, ShortenerError>, ResolutionOutcome) {
        match bounded(deadline, self.cache.get(alias), cache_deadline_error).await {
            Ok(Some(target)) => {
                metrics::counter!("cache_hits_total").increment(1);
                debug!("Cache HIT for {}", alias);
                return (Ok(target), ResolutionOutcome::Hit);
            }
            Ok(None) => {
                metrics::counter!("cache_misses_total").increment(1);
                debug!("Cache MISS for {}", alias);
            }
            Err(e) => {
                metrics::counter!("cache_errors_total", "op" => "get").increment(1);
                warn!("Cache lookup failed for {}, falling back to store: {}", alias, e);
            }
        }

        match bounded(deadline, self.store.get(alias), store_deadline_error).await {
            Ok(target) => {
                if let Err(e) =
                    bounded(deadline, self.cache.save(alias, &target), cache_deadline_error).await
                {
                    metrics::counter!("cache_errors_total", "op" => "save").increment(1);
                    warn!("Failed to warm cache for {}: {}", alias, e);
                }
                (Ok(target), ResolutionOutcome::Miss)
            }
            Err(StoreError::NotFound) => {
                debug!("Alias {} not found", alias);
                (
                    Err(ShortenerError::NotFound {
                        alias: alias.to_string(),
                    }),
                    ResolutionOutcome::Error,
                )
            }
            Err(e) => {
                error!("Failed to resolve {}: {}", alias, e);
                (
                    Err(ShortenerError::Internal(e.to_string())),
                    ResolutionOutcome::Error,
                )
            }
        }
    }
}

/// Runs `call` under `deadline`, turning expiry into the error from `on_timeout`.
async fn bounded<T, E, F>(
    deadline: Deadline,
    call: F,
    on_timeout: impl FnOnce() -> E,
) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    deadline.run(call).await.unwrap_or_else(|_| Err(on_timeout()))
}

fn store_deadline_error() -> StoreError {
    StoreError::Unavailable(DEADLINE_EXCEEDED.to_string())
}

fn cache_deadline_error() -> CacheError {
    CacheError::Unavailable(DEADLINE_EXCEEDED.to_string())
}
