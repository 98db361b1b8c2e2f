use crate::domain::model::Notice;
use crate::domain::ports::NoticeSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const FEED_ENDPOINT: &str = "https://www.federalregister.gov/api/v1/documents.json";

/// FDA's agency id in the Federal Register API.
const FDA_AGENCY_ID: &str = "164";
const DOCUMENT_TYPE: &str = "NOTICE";
const SEARCH_TERM: &str = "CDER drug advisory";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Deserialize)]
struct FeedResponse {
    #[serde(default)]
    results: Vec<FeedDocument>,
}

#[derive(Debug, Deserialize)]
struct FeedDocument {
    title: String,
    publication_date: NaiveDate,
    html_url: String,
    #[serde(default)]
    document_number: Option<String>,
}

impl From<FeedDocument> for Notice {
    fn from(doc: FeedDocument) -> Self {
        let id = match doc.document_number {
            Some(number) => number,
            None => {
                // Titles can repeat across unrelated notices, so dedup on a
                // title-derived id is weaker than on a document number.
                tracing::warn!("Notice without document_number, using title as id");
                doc.title.clone()
            }
        };
        Notice {
            id,
            title: doc.title,
            publication_date: doc.publication_date,
            url: doc.html_url,
        }
    }
}

/// Live notice source backed by the Federal Register documents API.
pub struct FederalRegisterSource {
    endpoint: String,
    timeout: Duration,
    client: Client,
}

impl FederalRegisterSource {
    pub fn new() -> Self {
        Self::with_endpoint(FEED_ENDPOINT.to_string())
    }

    pub fn with_endpoint(endpoint: String) -> Self {
        Self {
            endpoint,
            timeout: DEFAULT_TIMEOUT,
            client: Client::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn fetch_inner(&self) -> Result<Vec<Notice>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("conditions[agency_ids][]", FDA_AGENCY_ID),
                ("conditions[type][]", DOCUMENT_TYPE),
                ("conditions[term]", SEARCH_TERM),
                ("order", "newest"),
            ])
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;

        let feed: FeedResponse = response.json().await?;
        Ok(feed.results.into_iter().map(Notice::from).collect())
    }
}

impl Default for FederalRegisterSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NoticeSource for FederalRegisterSource {
    async fn fetch(&self) -> Vec<Notice> {
        match self.fetch_inner().await {
            Ok(notices) => notices,
            Err(e) => {
                // Degrades to a quiet day; callers cannot tell the difference.
                tracing::warn!("Feed fetch failed, treating as empty: {}", e);
                Vec::new()
            }
        }
    }
}

/// Test-mode source: one synthetic notice instead of the live feed, for
/// verifying the alert path end to end.
pub struct FixtureSource;

#[async_trait]
impl NoticeSource for FixtureSource {
    async fn fetch(&self) -> Vec<Notice> {
        let doc = FeedDocument {
            title: "Advisory Committee: New Drug Application for Pfizer Oncology".to_string(),
            publication_date: NaiveDate::from_ymd_opt(2025, 12, 27).expect("static date"),
            html_url: "https://www.federalregister.gov".to_string(),
            document_number: None,
        };
        vec![doc.into()]
    }
}
