pub mod dedup;
pub mod filter;
pub mod scanner;

pub use crate::domain::model::{AlertEvent, AlertOutcome, Notice, Watchlist};
pub use crate::domain::ports::{InsightAnnotator, NoticeSource, Notifier};
pub use crate::utils::error::Result;
