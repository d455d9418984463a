//! Analytics sink trait.

use crate::domain::entities::ResolvedEvent;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("analytics sink rejected event: {0}")]
    Rejected(String),
}

/// External consumer of [`ResolvedEvent`]s.
///
/// The resolution path never calls a sink directly; events travel through
/// [`crate::domain::analytics_worker::AnalyticsDispatcher`] so a slow sink can
/// never delay a redirect.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    async fn track(&self, event: ResolvedEvent) -> Result<(), AnalyticsError>;
}
