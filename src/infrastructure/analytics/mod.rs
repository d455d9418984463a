//! Analytics sink implementations.
//!
//! - [`TracingSink`] - Emits every event as a structured log record
//! - [`SqliteClickSink`] - Stores every event in the `clicks` table

mod sqlite_sink;
mod tracing_sink;

pub use sqlite_sink::SqliteClickSink;
pub use tracing_sink::TracingSink;
