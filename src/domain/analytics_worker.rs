//! Non-blocking analytics dispatch and the background worker feeding the sink.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, info, warn};

use crate::domain::analytics::AnalyticsSink;
use crate::domain::entities::ResolvedEvent;

/// Sending half of the bounded analytics queue.
///
/// [`AnalyticsDispatcher::dispatch`] never waits: when the queue is full the
/// event is dropped and counted, so sustained sink backpressure costs
/// analytics, not redirect latency.
#[derive(Debug, Clone)]
pub struct AnalyticsDispatcher {
    sender: mpsc::Sender<ResolvedEvent>,
}

impl AnalyticsDispatcher {
    /// Creates a dispatcher and the receiver to hand to [`run_analytics_worker`].
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<ResolvedEvent>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }

    /// Queues an event. Returns `false` if it was dropped.
    pub fn dispatch(&self, event: ResolvedEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                metrics::counter!("analytics_events_dropped_total", "reason" => "full")
                    .increment(1);
                warn!(alias = %event.alias, "Analytics queue full, dropping event");
                false
            }
            Err(TrySendError::Closed(event)) => {
                metrics::counter!("analytics_events_dropped_total", "reason" => "closed")
                    .increment(1);
                warn!(alias = %event.alias, "Analytics queue closed, dropping event");
                false
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Free slots left in the queue.
    pub fn capacity(&self) -> usize {
        self.sender.capacity()
    }
}

/// Feeds queued events to `sink` until every dispatcher has been dropped.
///
/// Each `track` call is bounded by `track_timeout`. Failures are logged and
/// the event is discarded; delivery is best-effort.
pub async fn run_analytics_worker(
    mut rx: mpsc::Receiver<ResolvedEvent>,
    sink: Arc<dyn AnalyticsSink>,
    track_timeout: Duration,
) {
    while let Some(event) = rx.recv().await {
        let alias = event.alias.clone();

        match tokio::time::timeout(track_timeout, sink.track(event)).await {
            Ok(Ok(())) => debug!(alias = %alias, "Analytics event delivered"),
            Ok(Err(e)) => warn!(alias = %alias, error = %e, "Failed to deliver analytics event"),
            Err(_) => warn!(alias = %alias, "Analytics sink timed out"),
        }
    }

    info!("Analytics worker stopped");
}
