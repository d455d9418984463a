//! DTOs for the save endpoint.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::{Validate, ValidationError};

/// Compiled regex for client-chosen aliases.
static ALIAS_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Aliases that would shadow a fixed route.
pub const RESERVED_ALIASES: &[&str] = &["url", "health", "alias"];

/// Request to save a URL, optionally under a chosen alias.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveUrlRequest {
    /// Absolute `http` or `https` URL to redirect to.
    #[validate(custom(function = "validate_target_url"))]
    pub url: String,

    /// Optional alias; generated when absent or empty.
    #[validate(length(max = 64, message = "Alias must be at most 64 characters"))]
    #[validate(custom(function = "validate_alias"))]
    pub alias: Option<String>,
}

impl SaveUrlRequest {
    /// The target in its serialized `url` form: host lowercased and IDNA
    /// encoded, non-ASCII percent-encoded, empty path written as `/`.
    ///
    /// This is what gets stored, so a later redirect always yields a valid
    /// `Location` header. `None` if the URL does not parse.
    pub fn normalized_url(&self) -> Option<String> {
        ::url::Url::parse(&self.url).ok().map(String::from)
    }

    /// The requested alias, with an empty string treated as none.
    pub fn requested_alias(&self) -> Option<&str> {
        self.alias.as_deref().filter(|a| !a.is_empty())
    }
}

#[derive(Debug, Serialize)]
pub struct SaveUrlResponse {
    pub alias: String,
}

fn validate_target_url(target: &str) -> Result<(), ValidationError> {
    // The parser silently drops these, which would store a different URL.
    if target.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return Err(ValidationError::new("url_whitespace")
            .with_message("URL must not contain whitespace or control characters".into()));
    }

    match ::url::Url::parse(target) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(()),
        _ => Err(ValidationError::new("url").with_message("Invalid URL format".into())),
    }
}

fn validate_alias(alias: &str) -> Result<(), ValidationError> {
    // Empty means "generate one".
    if alias.is_empty() {
        return Ok(());
    }

    if !ALIAS_REGEX.is_match(alias) {
        return Err(ValidationError::new("alias_charset")
            .with_message("Alias may only contain letters, digits, '_' and '-'".into()));
    }

    if RESERVED_ALIASES.contains(&alias.to_ascii_lowercase().as_str()) {
        return Err(ValidationError::new("alias_reserved").with_message("Alias is reserved".into()));
    }

    Ok(())
}
