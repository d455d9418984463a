//! Core domain entities.
//!
//! - [`UrlRecord`] - The authoritative alias → target mapping
//! - [`ResolvedEvent`] - A resolve request outcome handed to analytics

pub mod resolved_event;
pub mod url_record;

pub use resolved_event::{ClientInfo, ResolutionOutcome, ResolvedEvent};
pub use url_record::UrlRecord;
