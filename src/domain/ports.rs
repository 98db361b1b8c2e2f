use crate::domain::model::Notice;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Retrieves candidate notices from the external feed.
///
/// Transport and decode failures degrade to an empty vec at this boundary:
/// callers cannot tell a quiet day from a failed fetch. Documented weakness,
/// failures are logged where they happen.
#[async_trait]
pub trait NoticeSource: Send + Sync {
    async fn fetch(&self) -> Vec<Notice>;
}

/// Dispatches one alert message per successful call. No automatic retry.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notice: &Notice) -> Result<()>;
}

/// Best-effort market-impact note for a notice title. Implementations must
/// return a placeholder string instead of failing.
#[async_trait]
pub trait InsightAnnotator: Send + Sync {
    async fn annotate(&self, title: &str) -> String;
}
