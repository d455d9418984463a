//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating the alias
//! generator, the store, the cache and the analytics queue. Services consume
//! the domain traits and provide a clean API for HTTP handlers and the admin
//! CLI.
//!
//! # Available Services
//!
//! - [`services::resolution_service::ResolutionService`] - Alias save, resolve and delete

pub mod services;
