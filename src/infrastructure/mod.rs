//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the contracts defined in [`crate::domain`].
//!
//! # Modules
//!
//! - [`analytics`] - Analytics sinks
//! - [`cache`] - Caching abstractions (Redis and no-op implementations)
//! - [`generator`] - Alias generators (random, counter, remote)
//! - [`persistence`] - SQLite/MongoDB URL stores and counter stores

pub mod analytics;
pub mod cache;
pub mod generator;
pub mod persistence;
