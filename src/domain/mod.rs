//! Domain layer: entities, collaborator contracts and request deadlines.
//!
//! Nothing in here depends on a concrete backend. Implementations live in
//! [`crate::infrastructure`]; orchestration lives in
//! [`crate::application::services`].
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Store traits ([`repositories::UrlStore`], [`repositories::CounterStore`])
//! - [`alias_generator`] - Alias generation contract
//! - [`analytics`] - Analytics sink contract
//! - [`analytics_worker`] - Bounded, non-blocking event dispatch
//! - [`deadline`] - Per-request deadline propagated to every external call

pub mod alias_generator;
pub mod analytics;
pub mod analytics_worker;
pub mod deadline;
pub mod entities;
pub mod repositories;
