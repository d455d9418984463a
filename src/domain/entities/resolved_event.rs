//! Resolution event model for asynchronous analytics delivery.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// How a resolve request was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionOutcome {
    /// Served from the cache without touching the store.
    Hit,
    /// Cache missed (or failed) and the store supplied the target.
    Miss,
    /// The alias was not found or the store failed.
    Error,
}

impl ResolutionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ResolutionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request metadata of the client that followed an alias.
///
/// Every field is optional; missing headers and unknown peers are simply
/// left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClientInfo {
    pub user_agent: Option<String>,
    pub ip: Option<String>,
    pub referrer: Option<String>,
}

/// An in-memory record of a single resolve request.
///
/// Created by [`crate::application::services::ResolutionService::resolve`]
/// and handed to the analytics dispatcher. The resolution path never waits
/// for its delivery.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedEvent {
    pub alias: String,
    #[serde(rename = "latency_ms", serialize_with = "serialize_millis")]
    pub latency: Duration,
    pub outcome: ResolutionOutcome,
    pub occurred_at: DateTime<Utc>,
    #[serde(flatten)]
    pub client: ClientInfo,
}

impl ResolvedEvent {
    /// Creates an event stamped with the current time and no client metadata.
    pub fn new(alias: impl Into<String>, latency: Duration, outcome: ResolutionOutcome) -> Self {
        Self {
            alias: alias.into(),
            latency,
            outcome,
            occurred_at: Utc::now(),
            client: ClientInfo::default(),
        }
    }

    pub fn with_client(mut self, client: ClientInfo) -> Self {
        self.client = client;
        self
    }
}

fn serialize_millis<S>(latency: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(latency.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_event_creation() {
        let before = Utc::now();
        let event = ResolvedEvent::new("abc", Duration::from_millis(12), ResolutionOutcome::Hit);

        assert_eq!(event.alias, "abc");
        assert_eq!(event.latency, Duration::from_millis(12));
        assert_eq!(event.outcome, ResolutionOutcome::Hit);
        assert!(event.occurred_at >= before);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(ResolutionOutcome::Hit.to_string(), "hit");
        assert_eq!(ResolutionOutcome::Miss.to_string(), "miss");
        assert_eq!(ResolutionOutcome::Error.to_string(), "error");
    }

    #[test]
    fn test_event_serializes_latency_in_millis() {
        let event = ResolvedEvent::new("x1", Duration::from_micros(2_500), ResolutionOutcome::Miss);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["alias"], "x1");
        assert_eq!(json["latency_ms"], 2);
        assert_eq!(json["outcome"], "miss");
        assert!(json["user_agent"].is_null());
    }

    #[test]
    fn test_event_carries_client_info() {
        let client = ClientInfo {
            user_agent: Some("curl/8.5".to_string()),
            ip: Some("203.0.113.7".to_string()),
            referrer: None,
        };
        let event = ResolvedEvent::new("x1", Duration::ZERO, ResolutionOutcome::Hit)
            .with_client(client.clone());

        assert_eq!(event.client, client);

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["user_agent"], "curl/8.5");
        assert_eq!(json["ip"], "203.0.113.7");
        assert!(json["referrer"].is_null());
    }
}
