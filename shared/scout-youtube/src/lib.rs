//! Scout YouTube - Video search providers feeding the ranking pipeline

pub mod config;
pub mod providers;

pub use config::{ProviderConfig, ProviderType};
pub use providers::{create_provider, FixtureProvider, VideoSearchProvider, YouTubeProvider};

/// Result type for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Error types for provider operations
#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("API quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}
