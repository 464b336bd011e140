use serde::Deserialize;
use std::{num::NonZeroUsize, time::Duration};

use crate::cache::DEFAULT_CACHE_CAPACITY;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Image analysis (face detection + image properties) API key
    #[serde(default)]
    pub vision_api_key: Option<String>,

    /// Image analysis annotate endpoint
    #[serde(default = "default_vision_api_url")]
    pub vision_api_url: String,

    /// Text generation API key
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// Text generation API base URL
    #[serde(default = "default_gemini_api_url")]
    pub gemini_api_url: String,

    /// Text generation model name
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// Use the generative outfit strategy instead of the static catalog
    #[serde(default)]
    pub use_real_brain: bool,

    /// Outfit response cache TTL in seconds, 0 disables caching
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Maximum number of memoized outfit rankings
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Timeout applied to every outbound AI request
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Optional JSON file replacing the built-in outfit catalog
    #[serde(default)]
    pub catalog_path: Option<String>,

    /// Maximum accepted request body size (base64 images are large)
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_vision_api_url() -> String {
    "https://vision.googleapis.com/v1/images:annotate".to_string()
}

fn default_gemini_api_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-pro".to_string()
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY.get()
}

fn default_http_timeout_secs() -> u64 {
    15
}

fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Cache TTL, or `None` when caching is disabled
    pub fn cache_ttl(&self) -> Option<Duration> {
        (self.cache_ttl_secs > 0).then(|| Duration::from_secs(self.cache_ttl_secs))
    }

    /// Cache capacity, or `None` when set to 0
    pub fn cache_capacity(&self) -> Option<NonZeroUsize> {
        NonZeroUsize::new(self.cache_capacity)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Credential lookup that treats blank values as unset
    pub fn vision_key(&self) -> Option<&str> {
        non_blank(self.vision_api_key.as_deref())
    }

    pub fn gemini_key(&self) -> Option<&str> {
        non_blank(self.gemini_api_key.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
