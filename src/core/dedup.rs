use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

/// Tracks which notice ids already triggered an alert, with a time-bounded
/// retention window. Process-local: state is lost on restart, and the feed is
/// the source of truth, so a restart-induced re-alert is tolerated.
///
/// State machine per id: Unseen -> Notified(timestamp). After the window
/// elapses the id counts as Unseen again.
pub struct DedupLedger {
    window: Duration,
    records: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl DedupLedger {
    /// Standard 24-hour suppression window.
    pub fn new() -> Self {
        Self::with_window(Duration::hours(24))
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            records: Mutex::new(HashMap::new()),
        }
    }

    /// True iff the id has no record, or its record is older than the window.
    pub fn should_notify(&self, id: &str, now: DateTime<Utc>) -> bool {
        let records = self.records.lock().expect("dedup ledger mutex poisoned");
        match records.get(id) {
            None => true,
            Some(notified_at) => now - *notified_at >= self.window,
        }
    }

    /// Inserts or overwrites the record for the id. Expired records are
    /// evicted lazily on each write.
    pub fn record_notified(&self, id: &str, now: DateTime<Utc>) {
        let mut records = self.records.lock().expect("dedup ledger mutex poisoned");
        records.retain(|_, notified_at| now - *notified_at < self.window);
        records.insert(id.to_string(), now);
    }

    /// Atomic check-then-record under one lock. Returns true when the caller
    /// won the claim and owes a notification; concurrent passes racing on the
    /// same id see exactly one winner.
    pub fn try_claim(&self, id: &str, now: DateTime<Utc>) -> bool {
        let mut records = self.records.lock().expect("dedup ledger mutex poisoned");
        let fresh = match records.get(id) {
            None => true,
            Some(notified_at) => now - *notified_at >= self.window,
        };
        if fresh {
            records.retain(|_, notified_at| now - *notified_at < self.window);
            records.insert(id.to_string(), now);
        }
        fresh
    }

    /// Rescinds a claim after a failed delivery so a later pass may retry.
    pub fn release(&self, id: &str) {
        let mut records = self.records.lock().expect("dedup ledger mutex poisoned");
        records.remove(id);
    }

    /// Number of ids currently tracked (expired entries may still count
    /// until the next write evicts them).
    pub fn tracked(&self) -> usize {
        self.records
            .lock()
            .expect("dedup ledger mutex poisoned")
            .len()
    }
}

impl Default for DedupLedger {
    fn default() -> Self {
        Self::new()
    }
}
