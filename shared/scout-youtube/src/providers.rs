//! Video search provider implementations

use crate::{ProviderConfig, ProviderError, ProviderType, Result};
use async_trait::async_trait;
use scout_core::RawVideoRecord;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// The API accepts at most this many ids per `videos.list` call
const MAX_IDS_PER_REQUEST: usize = 50;

const DETAIL_PARTS: &str = "snippet,contentDetails,statistics";

/// Source of video ids for a topic and of the per-video resources
#[async_trait]
pub trait VideoSearchProvider: Send + Sync {
    /// Ids of the videos matching `topic`, in relevance order
    async fn search(&self, topic: &str, max_results: u32) -> Result<Vec<String>>;

    /// Full resources for `video_ids`, in request order
    async fn fetch_details(&self, video_ids: &[String]) -> Result<Vec<RawVideoRecord>>;

    fn provider_type(&self) -> ProviderType;
}

/// Create a provider instance based on configuration
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn VideoSearchProvider>> {
    match config.provider() {
        ProviderType::YouTube => Ok(Box::new(YouTubeProvider::new(config.clone())?)),
        ProviderType::Fixture => {
            let path = config.fixture_path().ok_or_else(|| {
                ProviderError::Configuration("fixture provider needs a fixture path".to_string())
            })?;
            Ok(Box::new(FixtureProvider::new(path.to_path_buf())))
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    id: Option<SearchResultId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResultId {
    #[serde(default)]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<RawVideoRecord>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    reason: String,
}

/// Map an unsuccessful API response body to a provider error
fn api_error(status: u16, body: &str) -> ProviderError {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => {
            let quota = envelope
                .error
                .errors
                .iter()
                .any(|detail| detail.reason == "quotaExceeded");
            if quota {
                ProviderError::QuotaExceeded(envelope.error.message)
            } else {
                ProviderError::Api {
                    status,
                    message: envelope.error.message,
                }
            }
        }
        Err(_) => ProviderError::Api {
            status,
            message: body.to_string(),
        },
    }
}

/// YouTube Data API v3 provider
pub struct YouTubeProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl YouTubeProvider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        if config.api_key().is_none() {
            return Err(ProviderError::Configuration(
                "YouTube API key required".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self { config, client })
    }

    fn endpoint(&self, resource: &str) -> String {
        format!("{}/{}", self.config.base_url().trim_end_matches('/'), resource)
    }

    fn api_key(&self) -> Result<&str> {
        self.config
            .api_key()
            .ok_or_else(|| ProviderError::Configuration("YouTube API key not configured".to_string()))
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        resource: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let endpoint = self.endpoint(resource);
        debug!("Requesting {}", endpoint);

        let response = self
            .client
            .get(&endpoint)
            .query(query)
            .query(&[("key", self.api_key()?)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(api_error(status, &text));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl VideoSearchProvider for YouTubeProvider {
    async fn search(&self, topic: &str, max_results: u32) -> Result<Vec<String>> {
        let max_results = max_results.to_string();
        let response: SearchListResponse = self
            .get_json(
                "search",
                &[
                    ("part", "id"),
                    ("type", "video"),
                    ("q", topic),
                    ("maxResults", max_results.as_str()),
                ],
            )
            .await?;

        let ids: Vec<String> = response
            .items
            .into_iter()
            .filter_map(|item| item.id.and_then(|id| id.video_id))
            .collect();

        info!("🔍 Found {} videos for '{}'", ids.len(), topic);
        Ok(ids)
    }

    async fn fetch_details(&self, video_ids: &[String]) -> Result<Vec<RawVideoRecord>> {
        let mut records = Vec::with_capacity(video_ids.len());

        for chunk in video_ids.chunks(MAX_IDS_PER_REQUEST) {
            let ids = chunk.join(",");
            let response: VideoListResponse = self
                .get_json("videos", &[("part", DETAIL_PARTS), ("id", ids.as_str())])
                .await?;
            records.extend(response.items);
        }

        debug!("Fetched details for {} of {} videos", records.len(), video_ids.len());
        Ok(records)
    }

    fn provider_type(&self) -> ProviderType {
        ProviderType::YouTube
    }
}

/// Serves a saved `videos.list` response from disk
pub struct FixtureProvider {
    path: PathBuf,
}

impl FixtureProvider {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn load(&self) -> Result<Vec<RawVideoRecord>> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let response: VideoListResponse = serde_json::from_str(&content)?;
        Ok(response.items)
    }
}

#[async_trait]
impl VideoSearchProvider for FixtureProvider {
    async fn search(&self, topic: &str, max_results: u32) -> Result<Vec<String>> {
        debug!(
            "Fixture {} serves the same videos for every topic ('{}')",
            self.path.display(),
            topic
        );
        Ok(self
            .load()
            .await?
            .into_iter()
            .take(max_results as usize)
            .map(|record| record.id)
            .collect())
    }

    async fn fetch_details(&self, video_ids: &[String]) -> Result<Vec<RawVideoRecord>> {
        let mut by_id: HashMap<String, RawVideoRecord> = self
            .load()
            .await?
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();

        // unknown ids are omitted, as the live API does
        Ok(video_ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    fn provider_type(&self) -> ProviderType {
        ProviderType::Fixture
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_error_is_recognised() {
        let body = r#"{
            "error": {
                "code": 403,
                "message": "The request cannot be completed because you have exceeded your quota.",
                "errors": [{ "domain": "youtube.quota", "reason": "quotaExceeded" }]
            }
        }"#;
        assert!(matches!(api_error(403, body), ProviderError::QuotaExceeded(_)));
    }

    #[test]
    fn test_other_api_errors_keep_status() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid", "errors": [{"reason": "badRequest"}]}}"#;
        match api_error(400, body) {
            ProviderError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("unexpected error: {:?}", other),
        }

        match api_error(502, "Bad Gateway") {
            ProviderError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_youtube_provider_requires_api_key() {
        let result = YouTubeProvider::new(ProviderConfig::default());
        assert!(matches!(result, Err(ProviderError::Configuration(_))));
    }

    #[test]
    fn test_create_fixture_provider_requires_path() {
        let config = ProviderConfig::new().with_provider(ProviderType::Fixture);
        assert!(create_provider(&config).is_err());

        let config = ProviderConfig::new().with_fixture_path(PathBuf::from("videos.json"));
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.provider_type(), ProviderType::Fixture);
    }
}
