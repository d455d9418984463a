//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into [`ResolutionService`] calls and
//! formats responses according to API contracts.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request observability middleware
//! - [`routes`] - Route configuration and composition
//!
//! [`ResolutionService`]: crate::application::services::ResolutionService

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
