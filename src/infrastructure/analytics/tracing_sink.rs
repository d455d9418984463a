//! Analytics sink that writes events to the log.

use async_trait::async_trait;
use tracing::info;

use crate::domain::analytics::{AnalyticsError, AnalyticsSink};
use crate::domain::entities::ResolvedEvent;

/// Emits each [`ResolvedEvent`] as an `INFO` record on the `analytics` target.
///
/// With `LOG_FORMAT=json` the records can be shipped to an external pipeline
/// as-is; filter them with `RUST_LOG=analytics=info`.
#[derive(Debug, Default)]
pub struct TracingSink;

#[async_trait]
impl AnalyticsSink for TracingSink {
    async fn track(&self, event: ResolvedEvent) -> Result<(), AnalyticsError> {
        info!(
            target: "analytics",
            alias = %event.alias,
            latency_ms = event.latency.as_millis() as u64,
            outcome = %event.outcome,
            occurred_at = %event.occurred_at.to_rfc3339(),
            user_agent = event.client.user_agent.as_deref().unwrap_or("-"),
            ip = event.client.ip.as_deref().unwrap_or("-"),
            referrer = event.client.referrer.as_deref().unwrap_or("-"),
            "resolved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ResolutionOutcome;
    use std::time::Duration;

    #[tokio::test]
    async fn test_tracing_sink_accepts_events() {
        let sink = TracingSink;
        let event = ResolvedEvent::new("abc", Duration::from_millis(3), ResolutionOutcome::Miss);

        assert!(sink.track(event).await.is_ok());
    }
}
