use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One regulatory document record from the Federal Register feed.
///
/// `id` is the stable `document_number` when the feed provides one; otherwise
/// it falls back to the title. Titles can collide across unrelated notices,
/// so the fallback is logged where it happens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub id: String,
    pub title: String,
    pub publication_date: NaiveDate,
    pub url: String,
}

/// User-supplied company names, parsed from a comma-separated string into
/// lowercase trimmed tokens (order-preserving, duplicates dropped).
#[derive(Debug, Clone, PartialEq)]
pub struct Watchlist {
    tokens: Vec<String>,
}

impl Watchlist {
    pub fn parse(raw: &str) -> Self {
        let mut tokens: Vec<String> = Vec::new();
        for token in raw.split(',') {
            let token = token.trim().to_lowercase();
            if !token.is_empty() && !tokens.contains(&token) {
                tokens.push(token);
            }
        }
        Self { tokens }
    }

    /// True iff any token is a case-insensitive substring of the title.
    ///
    /// Substring matching, not whole-word: a short token like "novo" will
    /// also hit titles containing "Novocaine". Accepted heuristic.
    pub fn matches(&self, title: &str) -> bool {
        let title = title.to_lowercase();
        self.tokens.iter().any(|token| title.contains(token))
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// What happened to one relevant notice during a scan pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertOutcome {
    /// No watchlist token matched the title.
    NotMatched,
    /// Matched, but no notifier is configured (missing email settings).
    AlertsDisabled,
    /// Matched, but already notified within the dedup window.
    Suppressed,
    /// Matched and an alert went out.
    Sent,
    /// Matched, claim taken, but the transport failed; a later pass may retry.
    DeliveryFailed,
}

/// Ephemeral per-notice result of a scan pass. Never persisted.
#[derive(Debug, Clone)]
pub struct AlertEvent {
    pub notice: Notice,
    pub annotation: Option<String>,
    pub outcome: AlertOutcome,
}
