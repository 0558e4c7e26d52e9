//! Provider configuration and provider types

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Video search provider types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProviderType {
    /// YouTube Data API v3
    YouTube,
    /// Offline `videos.list` JSON file
    Fixture,
}

/// Provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    provider: ProviderType,
    base_url: String,
    api_key: Option<String>,
    timeout_seconds: u64,
    fixture_path: Option<PathBuf>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: ProviderType::YouTube,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout_seconds: 30,
            fixture_path: None,
        }
    }
}

impl ProviderConfig {
    /// Create new provider config
    pub fn new() -> Self {
        Self::default()
    }

    /// Get provider
    pub fn provider(&self) -> ProviderType {
        self.provider
    }

    /// Set provider
    pub fn with_provider(mut self, provider: ProviderType) -> Self {
        self.provider = provider;
        self
    }

    /// Get API base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Get API key
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Set API key
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Get timeout
    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Get fixture file
    pub fn fixture_path(&self) -> Option<&Path> {
        self.fixture_path.as_deref()
    }

    /// Set fixture file; this also selects the fixture provider
    pub fn with_fixture_path(mut self, path: PathBuf) -> Self {
        self.fixture_path = Some(path);
        self.provider = ProviderType::Fixture;
        self
    }
}
