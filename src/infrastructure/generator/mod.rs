//! Alias generator implementations.
//!
//! - [`RandomAliasGenerator`] - Fixed-length random aliases, generated locally
//! - [`CounterAliasGenerator`] - Base-62 encoding of an atomically incremented counter
//! - [`RemoteAliasGenerator`] - Client for the `alias-gen` service

mod counter;
mod random;
mod remote;

pub use counter::CounterAliasGenerator;
pub use random::{DEFAULT_ALIAS_LENGTH, RandomAliasGenerator};
pub use remote::RemoteAliasGenerator;
