use crate::domain::ports::InsightAnnotator;
use crate::utils::error::{Result, WatchError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

pub const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Minimum spacing between successive generation calls within one pass,
/// to stay under the external quota.
const PACE_DELAY: Duration = Duration::from_secs(1);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

const FALLBACK_NOTE: &str =
    "Analysis paused: the insight service could not be reached for this notice.";

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// Best-effort market-impact notes from the Generative Language API.
/// Failures never escape: the annotator degrades to a fixed placeholder.
pub struct GeminiAnnotator {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    last_call: Mutex<Option<Instant>>,
}

impl GeminiAnnotator {
    pub fn new(api_key: String, model: Option<String>) -> Self {
        Self::with_endpoint(GEMINI_ENDPOINT.to_string(), api_key, model)
    }

    pub fn with_endpoint(endpoint: String, api_key: String, model: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            last_call: Mutex::new(None),
        }
    }

    /// Blocking pace limiter, not a queue: waits out the remainder of the
    /// delay since the previous call before letting the next one through.
    async fn pace(&self) {
        let mut last_call = self.last_call.lock().await;
        if let Some(previous) = *last_call {
            let elapsed = previous.elapsed();
            if elapsed < PACE_DELAY {
                tokio::time::sleep(PACE_DELAY - elapsed).await;
            }
        }
        *last_call = Some(Instant::now());
    }

    async fn annotate_inner(&self, title: &str) -> Result<String> {
        let url = format!("{}/{}:generateContent", self.endpoint, self.model);
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: format!(
                        "In two sentences, assess the likely market impact of this \
                         FDA notice for biotech traders: {}",
                        title
                    ),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;

        let generated: GenerateResponse = response.json().await?;
        generated
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| WatchError::ProcessingError {
                message: "empty generation response".to_string(),
            })
    }
}

#[async_trait]
impl InsightAnnotator for GeminiAnnotator {
    async fn annotate(&self, title: &str) -> String {
        self.pace().await;
        match self.annotate_inner(title).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Insight generation failed: {}", e);
                FALLBACK_NOTE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn annotator(server: &MockServer) -> GeminiAnnotator {
        GeminiAnnotator::with_endpoint(
            server.url("/models"),
            "test-key".to_string(),
            None,
        )
    }

    #[tokio::test]
    async fn test_annotate_returns_generated_text() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/models/gemini-2.0-flash:generateContent")
                .query_param("key", "test-key");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "candidates": [
                        {"content": {"parts": [{"text": "  Likely bullish for Pfizer. \n"}]}}
                    ]
                }));
        });

        let note = annotator(&server).annotate("Pfizer Oncology NDA Review").await;

        api_mock.assert();
        assert_eq!(note, "Likely bullish for Pfizer.");
    }

    #[tokio::test]
    async fn test_annotate_server_error_yields_placeholder() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST)
                .path("/models/gemini-2.0-flash:generateContent");
            then.status(429);
        });

        let note = annotator(&server).annotate("Pfizer Oncology NDA Review").await;
        assert_eq!(note, FALLBACK_NOTE);
    }

    #[tokio::test]
    async fn test_annotate_empty_candidates_yields_placeholder() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST)
                .path("/models/gemini-2.0-flash:generateContent");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"candidates": []}));
        });

        let note = annotator(&server).annotate("Pfizer Oncology NDA Review").await;
        assert_eq!(note, FALLBACK_NOTE);
    }

    #[tokio::test]
    async fn test_custom_model_in_request_path() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/models/gemini-1.5-pro:generateContent");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "candidates": [{"content": {"parts": [{"text": "ok"}]}}]
                }));
        });

        let annotator = GeminiAnnotator::with_endpoint(
            server.url("/models"),
            "test-key".to_string(),
            Some("gemini-1.5-pro".to_string()),
        );
        annotator.annotate("title").await;

        api_mock.assert();
    }

    #[tokio::test]
    async fn test_successive_calls_are_paced() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST)
                .path("/models/gemini-2.0-flash:generateContent");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "candidates": [{"content": {"parts": [{"text": "ok"}]}}]
                }));
        });
        let annotator = annotator(&server);

        let start = std::time::Instant::now();
        annotator.annotate("first").await;
        annotator.annotate("second").await;

        // The second call must wait out the delay measured from the first.
        assert!(start.elapsed() >= PACE_DELAY);
    }
}
