use async_trait::async_trait;
use httpmock::prelude::*;
use regwatch::domain::ports::Notifier;
use regwatch::{
    AlertOutcome, DedupLedger, FederalRegisterSource, Notice, Result, ScanContext,
    ScanOrchestrator, Watchlist,
};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<String>>,
}

// Newtype: the orphan rule forbids implementing `Notifier` for
// `Arc<RecordingNotifier>` outside the crate that defines the trait.
struct NotifierHandle(Arc<RecordingNotifier>);

#[async_trait]
impl Notifier for NotifierHandle {
    async fn send(&self, notice: &Notice) -> Result<()> {
        self.0.sent.lock().unwrap().push(notice.id.clone());
        Ok(())
    }
}

fn feed_mock(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(GET).path("/documents.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "results": [
                    {
                        "title": "Pfizer Oncology NDA Review",
                        "publication_date": "2025-01-15",
                        "html_url": "https://www.federalregister.gov/d/2025-001",
                        "document_number": "2025-001"
                    },
                    {
                        "title": "Annual Budget Meeting",
                        "publication_date": "2025-01-14",
                        "html_url": "https://www.federalregister.gov/d/2025-002",
                        "document_number": "2025-002"
                    }
                ]
            }));
    })
}

fn context(watchlist: &str) -> ScanContext {
    ScanContext::new(Watchlist::parse(watchlist), Arc::new(DedupLedger::new()))
}

#[tokio::test]
async fn test_end_to_end_scan_alerts_once_per_matched_notice() {
    let server = MockServer::start();
    let api_mock = feed_mock(&server);

    let notifier = Arc::new(RecordingNotifier::default());
    let source = FederalRegisterSource::with_endpoint(server.url("/documents.json"));
    let orchestrator = ScanOrchestrator::new(source).with_notifier(NotifierHandle(Arc::clone(&notifier)));
    let ctx = context("pfizer");

    let report = orchestrator.run(&ctx).await;

    api_mock.assert();
    assert_eq!(report.fetched, 2);
    assert_eq!(report.relevant, 1);
    assert_eq!(report.events.len(), 1);
    assert_eq!(report.events[0].notice.id, "2025-001");
    assert_eq!(report.events[0].outcome, AlertOutcome::Sent);
    assert_eq!(*notifier.sent.lock().unwrap(), vec!["2025-001"]);
    assert_eq!(ctx.ledger.tracked(), 1);
}

#[tokio::test]
async fn test_back_to_back_scans_send_exactly_one_alert() {
    let server = MockServer::start();
    let api_mock = feed_mock(&server);

    let notifier = Arc::new(RecordingNotifier::default());
    let source = FederalRegisterSource::with_endpoint(server.url("/documents.json"));
    let orchestrator = ScanOrchestrator::new(source).with_notifier(NotifierHandle(Arc::clone(&notifier)));
    let ctx = context("pfizer");

    let first = orchestrator.run(&ctx).await;
    let second = orchestrator.run(&ctx).await;

    assert_eq!(api_mock.hits(), 2);
    assert_eq!(first.sent(), 1);
    assert_eq!(second.sent(), 0);
    assert_eq!(second.events[0].outcome, AlertOutcome::Suppressed);
    assert_eq!(notifier.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_feed_failure_completes_pass_without_alerts() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/documents.json");
        then.status(503);
    });

    let notifier = Arc::new(RecordingNotifier::default());
    let source = FederalRegisterSource::with_endpoint(server.url("/documents.json"));
    let orchestrator = ScanOrchestrator::new(source).with_notifier(NotifierHandle(Arc::clone(&notifier)));
    let ctx = context("pfizer");

    let report = orchestrator.run(&ctx).await;

    api_mock.assert();
    assert_eq!(report.fetched, 0);
    assert!(report.events.is_empty());
    assert!(notifier.sent.lock().unwrap().is_empty());
    assert_eq!(ctx.ledger.tracked(), 0);
}

#[tokio::test]
async fn test_watchlist_miss_sends_nothing() {
    let server = MockServer::start();
    feed_mock(&server);

    let notifier = Arc::new(RecordingNotifier::default());
    let source = FederalRegisterSource::with_endpoint(server.url("/documents.json"));
    let orchestrator = ScanOrchestrator::new(source).with_notifier(NotifierHandle(Arc::clone(&notifier)));
    let ctx = context("moderna");

    let report = orchestrator.run(&ctx).await;

    assert_eq!(report.relevant, 1);
    assert_eq!(report.events[0].outcome, AlertOutcome::NotMatched);
    assert!(notifier.sent.lock().unwrap().is_empty());
}
