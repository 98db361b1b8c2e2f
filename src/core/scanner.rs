use crate::core::dedup::DedupLedger;
use crate::core::filter;
use crate::domain::model::{AlertEvent, AlertOutcome, Watchlist};
use crate::domain::ports::{InsightAnnotator, NoticeSource, Notifier};
use chrono::Utc;
use std::sync::Arc;

/// Only the newest few relevant notices are processed per pass; the feed is
/// sorted newest-first.
pub const MAX_NOTICES_PER_PASS: usize = 5;

/// Explicit per-pass context: the watchlist plus a handle to the shared
/// dedup ledger. No ambient state.
pub struct ScanContext {
    pub watchlist: Watchlist,
    pub ledger: Arc<DedupLedger>,
}

impl ScanContext {
    pub fn new(watchlist: Watchlist, ledger: Arc<DedupLedger>) -> Self {
        Self { watchlist, ledger }
    }
}

/// Outcome summary of one fetch -> filter -> match -> notify pass.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub fetched: usize,
    pub relevant: usize,
    pub events: Vec<AlertEvent>,
}

impl ScanReport {
    pub fn matched(&self) -> usize {
        self.events
            .iter()
            .filter(|e| e.outcome != AlertOutcome::NotMatched)
            .count()
    }

    pub fn sent(&self) -> usize {
        self.events
            .iter()
            .filter(|e| e.outcome == AlertOutcome::Sent)
            .count()
    }
}

/// Composes source, filter, watchlist, ledger and notifier into one pass.
///
/// Each invocation is an independent pass over the current feed snapshot;
/// the only state carried across passes lives in the ledger, which makes a
/// repeated pass over an unchanged feed send nothing new.
pub struct ScanOrchestrator<S> {
    source: S,
    notifier: Option<Box<dyn Notifier>>,
    annotator: Option<Box<dyn InsightAnnotator>>,
    max_notices: usize,
}

impl<S: NoticeSource> ScanOrchestrator<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            notifier: None,
            annotator: None,
            max_notices: MAX_NOTICES_PER_PASS,
        }
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Some(Box::new(notifier));
        self
    }

    pub fn with_annotator(mut self, annotator: impl InsightAnnotator + 'static) -> Self {
        self.annotator = Some(Box::new(annotator));
        self
    }

    pub fn with_max_notices(mut self, max_notices: usize) -> Self {
        self.max_notices = max_notices;
        self
    }

    pub async fn run(&self, ctx: &ScanContext) -> ScanReport {
        let notices = self.source.fetch().await;
        let fetched = notices.len();
        tracing::debug!("Fetched {} notices from feed", fetched);

        let relevant_notices = filter::apply(notices);
        let relevant = relevant_notices.len();

        let mut events = Vec::new();
        for notice in relevant_notices.into_iter().take(self.max_notices) {
            // Annotation is display-only and independent of the alert path.
            let annotation = match &self.annotator {
                Some(annotator) => Some(annotator.annotate(&notice.title).await),
                None => None,
            };

            let outcome = if !ctx.watchlist.matches(&notice.title) {
                AlertOutcome::NotMatched
            } else if let Some(notifier) = &self.notifier {
                let now = Utc::now();
                if ctx.ledger.try_claim(&notice.id, now) {
                    match notifier.send(&notice).await {
                        Ok(()) => {
                            tracing::info!("🚨 Watchlist hit, alert sent: {}", notice.title);
                            AlertOutcome::Sent
                        }
                        Err(e) => {
                            ctx.ledger.release(&notice.id);
                            tracing::error!("Alert delivery failed for {}: {}", notice.id, e);
                            AlertOutcome::DeliveryFailed
                        }
                    }
                } else {
                    tracing::debug!("Duplicate suppressed for {}", notice.id);
                    AlertOutcome::Suppressed
                }
            } else {
                tracing::warn!("Watchlist hit but alerts are disabled: {}", notice.title);
                AlertOutcome::AlertsDisabled
            };

            events.push(AlertEvent {
                notice,
                annotation,
                outcome,
            });
        }

        let report = ScanReport {
            fetched,
            relevant,
            events,
        };
        tracing::info!(
            "Scan pass complete: fetched={} relevant={} matched={} sent={}",
            report.fetched,
            report.relevant,
            report.matched(),
            report.sent()
        );
        report
    }
}
