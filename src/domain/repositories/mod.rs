//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and are
//! implemented in `crate::infrastructure::persistence`. Mock implementations
//! are generated via `mockall` for unit tests.
//!
//! - [`UrlStore`] - Authoritative alias → target storage
//! - [`CounterStore`] - Monotonic counter behind the counter alias generator

pub mod counter_store;
pub mod url_store;

pub use counter_store::CounterStore;
pub use url_store::{AliasReuse, StoreError, UrlStore};

#[cfg(test)]
pub use counter_store::MockCounterStore;
#[cfg(test)]
pub use url_store::MockUrlStore;
