use std::sync::Arc;
use std::time::Duration;

use crate::application::services::ResolutionService;
use crate::domain::deadline::Deadline;
use crate::domain::repositories::CounterStore;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ResolutionService>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(service: Arc<ResolutionService>, request_timeout: Duration) -> Self {
        Self {
            service,
            request_timeout,
        }
    }

    /// Starts the deadline for one inbound request.
    pub fn deadline(&self) -> Deadline {
        Deadline::after(self.request_timeout)
    }
}

/// Shared state of the `alias-gen` service.
#[derive(Clone)]
pub struct AliasState {
    pub counter: Arc<dyn CounterStore>,
}

impl AliasState {
    pub fn new(counter: Arc<dyn CounterStore>) -> Self {
        Self { counter }
    }
}
