//! # Shortener
//!
//! An alias resolution service: saves target URLs under short aliases and
//! redirects aliases back to their targets, built with Axum, SQLite/MongoDB
//! and an optional Redis cache.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, collaborator traits, deadlines and analytics dispatch
//! - **Application Layer** ([`application`]) - The resolution service orchestrating save, resolve and delete
//! - **Infrastructure Layer** ([`infrastructure`]) - Stores, cache, alias generators and analytics sinks
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Cache-aside resolution; the store is the single source of truth
//! - Random, counter-based (local or remote) alias generation
//! - Per-request deadlines on every backend call
//! - Non-blocking analytics with drop-on-backpressure
//! - Configurable alias reuse after delete
//!
//! ## Quick Start
//!
//! ```bash
//! export SQLITE_PATH="storage.db"
//! export REDIS_URL="redis://localhost:6379"  # Optional
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{ResolutionService, ShortenerError};
    pub use crate::domain::analytics_worker::AnalyticsDispatcher;
    pub use crate::domain::deadline::Deadline;
    pub use crate::domain::entities::{ClientInfo, ResolutionOutcome, ResolvedEvent, UrlRecord};
    pub use crate::domain::repositories::{AliasReuse, StoreError, UrlStore};
    pub use crate::error::AppError;
    pub use crate::infrastructure::cache::{CacheError, UrlCache};
    pub use crate::state::AppState;
}
