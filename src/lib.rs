pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::federal_register::{FederalRegisterSource, FixtureSource};
pub use crate::adapters::gemini::GeminiAnnotator;
pub use crate::adapters::smtp::SmtpNotifier;
pub use crate::config::{CliConfig, WatchConfig};
pub use crate::core::dedup::DedupLedger;
pub use crate::core::scanner::{ScanContext, ScanOrchestrator, ScanReport};
pub use crate::domain::model::{AlertEvent, AlertOutcome, Notice, Watchlist};
pub use crate::utils::error::{Result, WatchError};
