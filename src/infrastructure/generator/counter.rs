//! Counter-backed alias generator.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::domain::alias_generator::{AliasGenerator, GeneratorError};
use crate::domain::repositories::CounterStore;
use crate::utils::alias_codec;

/// Encodes successive counter values as base-62 aliases.
///
/// Uniqueness follows from the counter never repeating a value, so aliases
/// from this generator only conflict with user-chosen ones.
pub struct CounterAliasGenerator {
    counter: Arc<dyn CounterStore>,
}

impl CounterAliasGenerator {
    pub fn new(counter: Arc<dyn CounterStore>) -> Self {
        Self { counter }
    }
}

#[async_trait]
impl AliasGenerator for CounterAliasGenerator {
    async fn next_alias(&self) -> Result<String, GeneratorError> {
        let value = self.counter.increment().await.map_err(|e| {
            error!("Failed to increment counter: {}", e);
            GeneratorError::Unavailable(e.to_string())
        })?;

        let alias = alias_codec::encode(value);
        debug!("Generated alias {} from counter value {}", alias, value);
        Ok(alias)
    }
}
