use anyhow::{anyhow, Context, Result};
use scout_core::ScoringConfig;
use scout_youtube::{ProviderConfig, ProviderType};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Largest page size the search endpoint accepts
pub const MAX_RESULTS_LIMIT: u32 = 50;

/// Config files looked up by `Config::load`, in order
const CONFIG_FILE_CANDIDATES: [&str; 2] = ["tube-scout.toml", "config/tube-scout.toml"];

/// Crates whose logs the binary shows; everything else stays at `warn`
const LOG_TARGETS: [&str; 3] = ["tube_scout", "scout_core", "scout_youtube"];

/// Configuration for Tube Scout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Video search provider settings
    pub youtube: YouTubeConfig,

    /// Scoring constants
    pub scoring: ScoringConfig,

    /// Output and storage settings
    pub output: OutputConfig,

    /// How many results the report shows
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YouTubeConfig {
    /// Which provider answers queries
    pub provider: ProviderType,

    /// API credential; usually supplied through `YOUTUBE_API_KEY`
    pub api_key: Option<String>,

    /// API base URL
    pub base_url: String,

    /// Videos requested per query
    pub max_results: u32,

    /// Request timeout in seconds
    pub timeout_seconds: u64,

    /// Saved `videos.list` response for the fixture provider
    pub fixture_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Csv,
    Markdown,
    Json,
}

impl ExportFormat {
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            other => Err(anyhow!("Unknown export format: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving exported files
    pub base_dir: PathBuf,

    /// Export formats
    pub export_formats: Vec<ExportFormat>,

    /// Log level
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Entries on the podium
    pub podium_size: usize,

    /// Further suggestions listed after the podium
    pub runners_up: usize,
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            provider: ProviderType::YouTube,
            api_key: None,
            base_url: scout_youtube::config::DEFAULT_BASE_URL.to_string(),
            max_results: 10,
            timeout_seconds: 30,
            fixture_path: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("./output"),
            export_formats: vec![ExportFormat::Csv, ExportFormat::Markdown],
            log_level: "info".to_string(),
        }
    }
}

impl OutputConfig {
    /// `EnvFilter` directives: `debug` for our crates when verbose, else the
    /// configured level, and `warn` for dependencies either way
    pub fn log_filter(&self, verbose: bool) -> String {
        let level = if verbose { "debug" } else { self.log_level.as_str() };
        let mut directives: Vec<String> = LOG_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, level))
            .collect();
        directives.push("warn".to_string());
        directives.join(",")
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            podium_size: 3,
            runners_up: 2,
        }
    }
}

impl YouTubeConfig {
    /// Provider settings for `scout_youtube::create_provider`
    pub fn provider_config(&self) -> ProviderConfig {
        let config = ProviderConfig::new()
            .with_provider(self.provider)
            .with_base_url(self.base_url.clone())
            .with_api_key(self.api_key.clone())
            .with_timeout(self.timeout_seconds);

        match &self.fixture_path {
            Some(path) if self.provider == ProviderType::Fixture => {
                config.with_fixture_path(path.clone())
            }
            _ => config,
        }
    }
}

impl Config {
    /// Load configuration from the first config file found, falling back to
    /// defaults, then apply environment overrides
    pub fn load() -> Result<Self> {
        match Self::find_config_file(Path::new(".")) {
            Some(path) => Self::load_from(&path),
            None => Self::from_env(),
        }
    }

    /// First of `tube-scout.toml` and `config/tube-scout.toml` under `base_dir`
    pub fn find_config_file(base_dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_CANDIDATES
            .iter()
            .map(|candidate| base_dir.join(candidate))
            .find(|path| path.is_file())
    }

    /// Load configuration from a specific file, then apply environment overrides
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.apply_env()?;
        Ok(config)
    }

    /// Defaults overridden by environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(api_key) = std::env::var("YOUTUBE_API_KEY") {
            if !api_key.trim().is_empty() {
                self.youtube.api_key = Some(api_key.trim().to_string());
            }
        }

        if let Ok(max_results) = std::env::var("TUBE_SCOUT_MAX_RESULTS") {
            self.youtube.max_results = max_results
                .parse()
                .with_context(|| format!("Invalid TUBE_SCOUT_MAX_RESULTS: {}", max_results))?;
        }

        if let Ok(output_dir) = std::env::var("TUBE_SCOUT_OUTPUT_DIR") {
            self.output.base_dir = PathBuf::from(output_dir);
        }

        if let Ok(log_level) = std::env::var("TUBE_SCOUT_LOG_LEVEL") {
            self.output.log_level = log_level;
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let config_str = toml::to_string_pretty(self)?;
        std::fs::write(path, config_str)?;
        tracing::info!("💾 Configuration saved to: {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        match self.youtube.provider {
            ProviderType::YouTube => {
                if self.youtube.api_key.is_none() {
                    return Err(anyhow!(
                        "YouTube API key required (set YOUTUBE_API_KEY or youtube.api_key)"
                    ));
                }
            }
            ProviderType::Fixture => {
                if self.youtube.fixture_path.is_none() {
                    return Err(anyhow!("fixture_path required for the fixture provider"));
                }
            }
        }

        if self.youtube.max_results == 0 || self.youtube.max_results > MAX_RESULTS_LIMIT {
            return Err(anyhow!(
                "max_results must be between 1 and {}",
                MAX_RESULTS_LIMIT
            ));
        }

        if self.display.podium_size == 0 {
            return Err(anyhow!("display.podium_size must be at least 1"));
        }

        let threshold = self.scoring.duration_threshold_minutes;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(anyhow!("duration_threshold_minutes must be a non-negative number"));
        }

        let epsilon = self.scoring.normalization_epsilon;
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(anyhow!("normalization_epsilon must be greater than 0"));
        }

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }

    /// Get runtime configuration summary
    pub fn summary(&self) -> String {
        format!(
            "Tube Scout Configuration:\n\
            - Provider: {:?}\n\
            - Max Results: {}\n\
            - Short-form Threshold: {} min\n\
            - Output Directory: {}\n\
            - Export Formats: {:?}",
            self.youtube.provider,
            self.youtube.max_results,
            self.scoring.duration_threshold_minutes,
            self.output.base_dir.display(),
            self.output.export_formats,
        )
    }
}

/// Configuration builder for programmatic config creation
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.config.youtube.api_key = Some(api_key);
        self
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.config.youtube.base_url = base_url;
        self
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.config.youtube.max_results = max_results;
        self
    }

    pub fn with_fixture(mut self, path: PathBuf) -> Self {
        self.config.youtube.provider = ProviderType::Fixture;
        self.config.youtube.fixture_path = Some(path);
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.config.scoring = scoring;
        self
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.config.output.base_dir = dir;
        self
    }

    pub fn with_export_formats(mut self, formats: Vec<ExportFormat>) -> Self {
        self.config.output.export_formats = formats;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
