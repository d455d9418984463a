//! URL record entity: the authoritative alias → target mapping.

/// A shortened URL mapping as stored by a [`crate::domain::repositories::UrlStore`].
///
/// `alias` is the primary key and globally unique; `target` has already been
/// validated as an absolute URL by the HTTP layer before it reaches the core.
/// Records are never updated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub alias: String,
    pub target: String,
}

impl UrlRecord {
    /// Creates a new record.
    pub fn new(alias: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            target: target.into(),
        }
    }
}
