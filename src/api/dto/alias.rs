//! DTOs for the `alias-gen` service.

use serde::Serialize;

/// Reply of `GET /alias`.
///
/// `{"status": "OK", "alias": "..."}` on success,
/// `{"status": "Error", "error": "..."}` otherwise.
#[derive(Debug, Serialize)]
pub struct AliasResponse {
    pub status: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AliasResponse {
    pub fn ok(alias: String) -> Self {
        Self {
            status: "OK",
            alias: Some(alias),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "Error",
            alias: None,
            error: Some(message.into()),
        }
    }
}
