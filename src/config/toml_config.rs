use crate::utils::error::{Result, WatchError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default watchlist when the config carries none.
pub const DEFAULT_WATCHLIST: &str = "Pfizer, Moderna, Biogen, Eli Lilly";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub watchlist: WatchlistConfig,
    pub email: Option<EmailConfig>,
    pub insight: Option<InsightConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedConfig {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub max_notices: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistConfig {
    pub companies: String,
}

impl Default for WatchlistConfig {
    fn default() -> Self {
        Self {
            companies: DEFAULT_WATCHLIST.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub smtp_host: Option<String>,
    pub sender: String,
    pub app_password: String,
    pub recipient: String,
}

impl EmailConfig {
    /// All three secrets present and resolved. An unresolved `${VAR}` left
    /// over from substitution counts as missing, and only disables the
    /// alert path rather than failing the scan.
    pub fn is_complete(&self) -> bool {
        [&self.sender, &self.app_password, &self.recipient]
            .iter()
            .all(|value| is_resolved(value))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightConfig {
    pub api_key: String,
    pub model: Option<String>,
}

impl InsightConfig {
    pub fn is_ready(&self) -> bool {
        is_resolved(&self.api_key)
    }
}

fn is_resolved(value: &str) -> bool {
    !value.trim().is_empty() && !value.contains("${")
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            feed: FeedConfig::default(),
            watchlist: WatchlistConfig::default(),
            email: None,
            insight: None,
        }
    }
}

impl WatchConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(WatchError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| WatchError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` with the environment value; unset variables
    /// are left as-is so downstream checks can flag them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").expect("static regex");

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(endpoint) = &self.feed.endpoint {
            validation::validate_url("feed.endpoint", endpoint)?;
        }

        if let Some(max_notices) = self.feed.max_notices {
            validation::validate_positive_number("feed.max_notices", max_notices, 1)?;
        }

        if let Some(email) = &self.email {
            if let Some(host) = &email.smtp_host {
                validation::validate_non_empty_string("email.smtp_host", host)?;
            }
        }

        Ok(())
    }
}

impl Validate for WatchConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
