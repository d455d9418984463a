//! HTTP client for the standalone `alias-gen` counter service.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error};
use url::Url;

use crate::domain::alias_generator::{AliasGenerator, GeneratorError};

/// Reply body of `GET /alias`.
#[derive(Debug, Deserialize)]
struct AliasReply {
    status: String,
    #[serde(default)]
    alias: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Fetches aliases from a remote counter service over HTTP.
///
/// The service owns the counter; this client only relays its answer. No
/// retries are attempted: a failed call surfaces as
/// [`GeneratorError::Unavailable`] and the caller decides what to do.
pub struct RemoteAliasGenerator {
    client: reqwest::Client,
    endpoint: Url,
}

impl RemoteAliasGenerator {
    /// Builds a client for the service at `base_url`.
    ///
    /// `timeout` bounds each request independently of the caller's deadline.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Unavailable`] if `base_url` is not a valid URL
    /// or the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GeneratorError> {
        let mut base = Url::parse(base_url).map_err(|e| {
            GeneratorError::Unavailable(format!("invalid alias generator URL {}: {}", base_url, e))
        })?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let endpoint = base.join("alias").map_err(|e| {
            GeneratorError::Unavailable(format!("invalid alias generator URL {}: {}", base_url, e))
        })?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeneratorError::Unavailable(format!("failed to build client: {}", e)))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl AliasGenerator for RemoteAliasGenerator {
    async fn next_alias(&self) -> Result<String, GeneratorError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|e| {
                error!("Alias generator request failed: {}", e);
                GeneratorError::Unavailable(e.to_string())
            })?;

        let status = response.status();
        let reply: AliasReply = response.json().await.map_err(|e| {
            GeneratorError::Unavailable(format!("unreadable reply (HTTP {}): {}", status, e))
        })?;

        if !status.is_success() || reply.status != "OK" {
            let reason = reply
                .error
                .unwrap_or_else(|| format!("HTTP {}", status));
            error!("Alias generator returned an error: {}", reason);
            return Err(GeneratorError::Unavailable(reason));
        }

        match reply.alias {
            Some(alias) if !alias.is_empty() => {
                debug!("Received alias {} from {}", alias, self.endpoint);
                Ok(alias)
            }
            _ => Err(GeneratorError::Unavailable(
                "alias generator returned an empty alias".to_string(),
            )),
        }
    }
}
