//! Per-request deadlines for calls to external collaborators.

use std::future::Future;
use std::time::Duration;
use tokio::time::{Instant, error::Elapsed, timeout_at};

/// An absolute point in time by which a request must finish.
///
/// Created once per inbound request and passed down to every store, cache and
/// generator call so that they all share the same budget. Dropping the future
/// returned by [`Deadline::run`] cancels the wrapped call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    /// Deadline `timeout` from now.
    pub fn after(timeout: Duration) -> Self {
        Self {
            at: Instant::now() + timeout,
        }
    }

    /// Deadline at a fixed instant.
    pub fn at(at: Instant) -> Self {
        Self { at }
    }

    /// Time left before the deadline, zero once it has passed.
    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.at
    }

    /// Drives `future` to completion unless the deadline passes first.
    pub async fn run<F: Future>(&self, future: F) -> Result<F::Output, Elapsed> {
        timeout_at(self.at, future).await
    }
}
