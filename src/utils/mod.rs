//! Helpers shared across layers.
//!
//! - [`alias_codec`] - Base-62 encoding of counter values into aliases
//! - [`client_info`] - User agent, peer IP and referrer of a request
//! - [`db_error`] - Classification of SQLx errors into store errors

pub mod alias_codec;
pub mod client_info;
pub mod db_error;
