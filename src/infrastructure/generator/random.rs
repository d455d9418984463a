//! Local random alias generator.

use async_trait::async_trait;
use rand::Rng;

use crate::domain::alias_generator::{AliasGenerator, GeneratorError};
use crate::utils::alias_codec::ALPHABET;

/// Default length of generated aliases.
pub const DEFAULT_ALIAS_LENGTH: usize = 8;

/// Draws fixed-length aliases uniformly from the base-62 alphabet.
///
/// Collisions are possible and deliberately not checked here: the store's
/// unique constraint rejects a duplicate and the client may retry.
#[derive(Debug, Clone)]
pub struct RandomAliasGenerator {
    length: usize,
}

impl RandomAliasGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    /// Generates one alias synchronously.
    pub fn generate(&self) -> String {
        let mut rng = rand::rng();
        (0..self.length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }
}

impl Default for RandomAliasGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ALIAS_LENGTH)
    }
}

#[async_trait]
impl AliasGenerator for RandomAliasGenerator {
    async fn next_alias(&self) -> Result<String, GeneratorError> {
        Ok(self.generate())
    }
}
