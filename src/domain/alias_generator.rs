//! Alias generator trait.

use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by alias generators.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The generator (or the counter behind it) could not produce an alias,
    /// including when the request deadline passed first.
    #[error("alias generator unavailable: {0}")]
    Unavailable(String),
}

/// Produces aliases for records saved without an explicit one.
///
/// Generators never check uniqueness themselves and never retry; a duplicate
/// alias is reported by the store as a conflict.
///
/// # Implementations
///
/// - [`crate::infrastructure::generator::RandomAliasGenerator`] - Local random strings
/// - [`crate::infrastructure::generator::CounterAliasGenerator`] - Base-62 of a persisted counter
/// - [`crate::infrastructure::generator::RemoteAliasGenerator`] - HTTP client for the `alias-gen` service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AliasGenerator: Send + Sync {
    /// Returns the next alias.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Unavailable`] when no alias can be produced.
    async fn next_alias(&self) -> Result<String, GeneratorError>;
}
