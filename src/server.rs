//! Server initialization and runtime setup.
//!
//! Handles logging setup, backend selection, analytics worker spawning and the
//! Axum server lifecycle of both binaries.

use crate::application::services::ResolutionService;
use crate::config::{
    AnalyticsSinkKind, Config, CounterServiceConfig, GeneratorKind, StorageBackend,
};
use crate::domain::alias_generator::AliasGenerator;
use crate::domain::analytics::AnalyticsSink;
use crate::domain::analytics_worker::{AnalyticsDispatcher, run_analytics_worker};
use crate::domain::deadline::Deadline;
use crate::domain::repositories::UrlStore;
use crate::infrastructure::analytics::{SqliteClickSink, TracingSink};
use crate::infrastructure::cache::{NullCache, RedisCache, UrlCache};
use crate::infrastructure::generator::{
    CounterAliasGenerator, RandomAliasGenerator, RemoteAliasGenerator,
};
use crate::infrastructure::persistence::{MongoUrlStore, SqliteUrlStore, connect_counter_store};
use crate::routes::{alias_router, app_router};
use crate::state::{AliasState, AppState};

use anyhow::{Context, Result};
use axum::extract::Request;
use axum::{Router, ServiceExt};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tower_http::normalize_path::NormalizePath;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// `log_level` is an `EnvFilter` directive string (e.g. `info` or
/// `shortener=debug,tower_http=info`); `log_format` is `text` or `json`.
pub fn init_tracing(log_level: &str, log_format: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Opens the URL store selected by `STORAGE_BACKEND`.
///
/// # Errors
///
/// Returns an error if the backend cannot be reached or migrated.
pub async fn build_store(config: &Config) -> Result<Arc<dyn UrlStore>> {
    let store: Arc<dyn UrlStore> = match config.storage_backend {
        StorageBackend::Sqlite => Arc::new(
            SqliteUrlStore::connect(
                &config.sqlite_path,
                config.db_max_connections,
                config.alias_reuse,
            )
            .await
            .with_context(|| format!("Failed to open SQLite store at {}", config.sqlite_path))?,
        ),
        StorageBackend::Mongo => {
            let uri = config
                .mongo_uri
                .as_deref()
                .context("MONGO_URI must be set when STORAGE_BACKEND=mongo")?;
            Arc::new(
                MongoUrlStore::connect(
                    uri,
                    &config.mongo_database,
                    &config.mongo_collection,
                    config.alias_reuse,
                )
                .await
                .context("Failed to connect to MongoDB")?,
            )
        }
    };

    Ok(store)
}

/// Connects the Redis cache, falling back to [`NullCache`] when Redis is not
/// configured or unreachable at startup.
pub async fn build_cache(config: &Config) -> Arc<dyn UrlCache> {
    let Some(redis_url) = &config.redis_url else {
        info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    };

    match RedisCache::connect(redis_url, config.cache_ttl()).await {
        Ok(redis) => {
            info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            warn!("Failed to connect to Redis: {}. Using NullCache.", e);
            Arc::new(NullCache::new())
        }
    }
}

/// Builds the alias generator selected by `ALIAS_GENERATOR`.
///
/// # Errors
///
/// Returns an error if the counter database or the remote endpoint cannot be
/// set up.
pub async fn build_generator(config: &Config) -> Result<Arc<dyn AliasGenerator>> {
    let generator: Arc<dyn AliasGenerator> = match config.alias_generator {
        GeneratorKind::Random => Arc::new(RandomAliasGenerator::new(config.alias_length)),
        GeneratorKind::Counter => {
            let url = config
                .counter_database_url
                .as_deref()
                .context("COUNTER_DATABASE_URL must be set when ALIAS_GENERATOR=counter")?;
            let counter =
                connect_counter_store(url, config.db_max_connections, config.db_connect_timeout())
                    .await
                    .context("Failed to connect to counter database")?;
            Arc::new(CounterAliasGenerator::new(counter))
        }
        GeneratorKind::Remote => Arc::new(
            RemoteAliasGenerator::new(&config.alias_generator_url, config.request_timeout())
                .context("Failed to set up remote alias generator")?,
        ),
    };

    info!("Alias generator: {}", config.alias_generator);
    Ok(generator)
}

/// Builds the analytics sink selected by `ANALYTICS_SINK`.
///
/// # Errors
///
/// Returns an error if the click database cannot be opened or migrated.
pub async fn build_analytics_sink(config: &Config) -> Result<Arc<dyn AnalyticsSink>> {
    let sink: Arc<dyn AnalyticsSink> = match config.analytics_sink {
        AnalyticsSinkKind::Log => Arc::new(TracingSink),
        AnalyticsSinkKind::Sqlite => {
            let path = config.analytics_sqlite_path();
            Arc::new(
                SqliteClickSink::connect(path, config.db_max_connections)
                    .await
                    .with_context(|| format!("Failed to open click database at {}", path))?,
            )
        }
    };

    info!("Analytics sink: {}", config.analytics_sink);
    Ok(sink)
}

/// Fully wired resolution service plus the handles needed to shut it down.
pub struct Shortener {
    pub service: Arc<ResolutionService>,
    pub store: Arc<dyn UrlStore>,
    pub analytics_worker: JoinHandle<()>,
}

/// Connects every backend and starts the analytics worker.
///
/// Shared by the HTTP server and the admin CLI.
///
/// # Errors
///
/// Returns an error if the store or the alias generator cannot be set up.
pub async fn build_shortener(config: &Config) -> Result<Shortener> {
    let store = build_store(config).await?;
    let cache = build_cache(config).await;
    let generator = build_generator(config).await?;
    let sink = build_analytics_sink(config).await?;

    let (analytics, analytics_rx) = AnalyticsDispatcher::channel(config.analytics_queue_capacity);
    let analytics_worker = tokio::spawn(run_analytics_worker(
        analytics_rx,
        sink,
        config.analytics_timeout(),
    ));
    info!("Analytics worker started");

    let service = Arc::new(ResolutionService::new(
        store.clone(),
        cache,
        generator,
        analytics,
    ));

    Ok(Shortener {
        service,
        store,
        analytics_worker,
    })
}

impl Shortener {
    /// Drains the analytics queue and closes the store, giving up on the
    /// queue once `deadline` passes.
    ///
    /// The queue only drains once every clone of the service is gone. Requests
    /// still running when the deadline passes keep their clone, so the worker
    /// is abandoned and the store is closed underneath them.
    pub async fn shutdown(self, deadline: Deadline) {
        drop(self.service);

        match deadline.run(self.analytics_worker).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!("Analytics worker failed: {}", e),
            Err(_) => warn!("Analytics queue not drained before the shutdown deadline"),
        }

        self.store.close().await;
        info!("Store closed");
    }
}

/// Runs the shortener HTTP server with the given configuration.
///
/// Initializes:
/// - URL store (SQLite or MongoDB, migrated on open)
/// - Redis cache (or NullCache fallback)
/// - Alias generator
/// - Background analytics worker
/// - Axum HTTP server
///
/// On SIGINT/SIGTERM the server stops accepting connections and drains
/// in-flight requests, then the analytics queue is drained and the store is
/// closed. Both drains share one `SHUTDOWN_TIMEOUT_SECONDS` budget counted
/// from the signal.
///
/// # Errors
///
/// Returns an error if:
/// - A backend cannot be set up
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let shortener = build_shortener(&config).await?;

    let state = AppState::new(shortener.service.clone(), config.request_timeout());
    let app = app_router(state);

    let listener = bind(&config.listen_addr).await?;
    let drain = serve_until_shutdown(listener, app, config.shutdown_timeout()).await?;

    shortener.shutdown(drain).await;
    info!("Shutdown complete");

    Ok(())
}

/// Runs the `alias-gen` counter service.
///
/// # Errors
///
/// Returns an error if the counter database cannot be reached or migrated, or
/// if the server fails to bind.
pub async fn run_alias_service(config: CounterServiceConfig) -> Result<()> {
    let counter = connect_counter_store(
        &config.counter_database_url,
        config.db_max_connections,
        config.db_connect_timeout(),
    )
    .await
    .context("Failed to connect to counter database")?;

    let app = alias_router(AliasState::new(counter));

    let listener = bind(&config.listen_addr).await?;
    serve_until_shutdown(listener, app, config.shutdown_timeout()).await?;

    info!("Shutdown complete");
    Ok(())
}

async fn bind(listen_addr: &str) -> Result<TcpListener> {
    let addr: SocketAddr = listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", listen_addr))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{addr}");
    Ok(listener)
}

/// Serves `app` until a shutdown signal arrives, then gives in-flight
/// requests at most `shutdown_timeout` to finish.
///
/// Returns the deadline started by the signal so that later shutdown steps
/// spend what is left of the same budget.
///
/// # Errors
///
/// Returns an error if the server fails before a signal arrives.
pub async fn serve_until_shutdown(
    listener: TcpListener,
    app: NormalizePath<Router>,
    shutdown_timeout: Duration,
) -> Result<Deadline> {
    let stop = Arc::new(Notify::new());
    let stop_server = stop.clone();

    let server = axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
        .with_graceful_shutdown(async move { stop_server.notified().await })
        .into_future();
    let mut server = std::pin::pin!(server);

    tokio::select! {
        result = &mut server => {
            result.context("Server error")?;
            return Ok(Deadline::after(shutdown_timeout));
        }
        _ = shutdown_signal() => {}
    }

    info!("Shutting down, draining in-flight requests");
    let drain = Deadline::after(shutdown_timeout);
    stop.notify_one();

    match drain.run(server).await {
        Ok(result) => result.context("Server error")?,
        Err(_) => warn!(
            "In-flight requests not drained within {:?}, closing",
            shutdown_timeout
        ),
    }

    Ok(drain)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
