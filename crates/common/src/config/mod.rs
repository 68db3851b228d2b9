//! Configuration management for Vidhi services
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config.toml, config.yaml)
//! - Default values
//!
//! Every retrieval policy constant (cache TTL, fetch timeout, content
//! thresholds, fan-out caps) lives here rather than in code, so deployments
//! can tune them; the defaults are the contract the test suite pins down.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Embedding service configuration
    pub embedding: EmbeddingConfig,

    /// Reasoning service configuration
    pub reasoner: ReasonerConfig,

    /// Live portal fetcher configuration
    pub fetcher: FetcherConfig,

    /// Context fusion configuration
    pub fusion: FusionConfig,

    /// Semantic retrieval configuration
    pub retrieval: RetrievalConfig,

    /// Observability configuration
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmbeddingConfig {
    /// Embedding provider: http, hash
    #[serde(default = "default_embedding_provider")]
    pub provider: String,

    /// API key for the embedding service
    pub api_key: Option<String>,

    /// API base URL (for custom endpoints)
    pub api_base: Option<String>,

    /// Model to use
    #[serde(default = "default_embedding_model")]
    pub model: String,

    /// Embedding dimension
    #[serde(default = "default_embedding_dimension")]
    pub dimension: usize,

    /// Request timeout in seconds
    #[serde(default = "default_embedding_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries
    #[serde(default = "default_embedding_retries")]
    pub max_retries: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReasonerConfig {
    /// API key for the chat-completions endpoint
    pub api_key: Option<String>,

    /// API base URL
    #[serde(default = "default_reasoner_base")]
    pub api_base: String,

    /// Model to use
    #[serde(default = "default_reasoner_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_reasoner_timeout")]
    pub timeout_secs: u64,

    /// Sampling temperature
    #[serde(default = "default_reasoner_temperature")]
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetcherConfig {
    /// Per-request fetch timeout in seconds
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,

    /// Cache TTL for successful fetches, in seconds
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,

    /// Minimum extracted-text length for a page to count as usable
    #[serde(default = "default_min_content_len")]
    pub min_content_len: usize,

    /// Maximum paragraph-like fragments extracted per page
    #[serde(default = "default_max_paragraphs")]
    pub max_paragraphs: usize,

    /// Maximum characters kept per source
    #[serde(default = "default_max_chars_per_source")]
    pub max_chars_per_source: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FusionConfig {
    /// How many configured sources are attempted per topic
    #[serde(default = "default_max_sources")]
    pub max_sources: usize,

    /// How many successful sources are accepted before stopping early
    #[serde(default = "default_success_target")]
    pub success_target: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetrievalConfig {
    /// How many corpus chunks back a query
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Minimum combined web-context length (chars) for the web path to win
    #[serde(default = "default_min_web_context_chars")]
    pub min_web_context_chars: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,

    /// Service name for tracing
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

// Default value functions
fn default_embedding_provider() -> String { "http".to_string() }
fn default_embedding_model() -> String { "all-MiniLM-L6-v2".to_string() }
fn default_embedding_dimension() -> usize { 384 }
fn default_embedding_timeout() -> u64 { 30 }
fn default_embedding_retries() -> u32 { 3 }
fn default_reasoner_base() -> String { "https://api.groq.com/openai/v1".to_string() }
fn default_reasoner_model() -> String { "llama-3.3-70b-versatile".to_string() }
fn default_reasoner_timeout() -> u64 { 60 }
fn default_reasoner_temperature() -> f32 { 0.2 }
fn default_fetch_timeout() -> u64 { 7 }
fn default_cache_ttl() -> u64 { 3600 }
fn default_min_content_len() -> usize { 100 }
fn default_max_paragraphs() -> usize { 50 }
fn default_max_chars_per_source() -> usize { 3500 }
fn default_max_sources() -> usize { 3 }
fn default_success_target() -> usize { 2 }
fn default_min_web_context_chars() -> usize { 300 }
fn default_top_k() -> usize { 3 }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { true }
fn default_service_name() -> String { "vidhi".to_string() }

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Load base config file
            .add_source(File::with_name("config/default").required(false))
            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            // Load local overrides
            .add_source(File::with_name("config/local").required(false))
            // Load from environment variables with APP__ prefix
            // e.g., APP__FETCHER__TIMEOUT_SECS=10
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load from a specific TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Get the fetch timeout as Duration
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetcher.timeout_secs)
    }

    /// Get the cache TTL as Duration
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.fetcher.cache_ttl_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            embedding: EmbeddingConfig {
                provider: default_embedding_provider(),
                api_key: None,
                api_base: None,
                model: default_embedding_model(),
                dimension: default_embedding_dimension(),
                timeout_secs: default_embedding_timeout(),
                max_retries: default_embedding_retries(),
            },
            reasoner: ReasonerConfig {
                api_key: None,
                api_base: default_reasoner_base(),
                model: default_reasoner_model(),
                timeout_secs: default_reasoner_timeout(),
                temperature: default_reasoner_temperature(),
            },
            fetcher: FetcherConfig {
                timeout_secs: default_fetch_timeout(),
                cache_ttl_secs: default_cache_ttl(),
                min_content_len: default_min_content_len(),
                max_paragraphs: default_max_paragraphs(),
                max_chars_per_source: default_max_chars_per_source(),
            },
            fusion: FusionConfig {
                max_sources: default_max_sources(),
                success_target: default_success_target(),
            },
            retrieval: RetrievalConfig {
                top_k: default_top_k(),
                min_web_context_chars: default_min_web_context_chars(),
            },
            observability: ObservabilityConfig {
                log_level: default_log_level(),
                json_logging: default_json_logging(),
                service_name: default_service_name(),
            },
        }
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        AppConfig::default().fetcher
    }
}

impl Default for FusionConfig {
    fn default() -> Self {
        AppConfig::default().fusion
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        AppConfig::default().retrieval
    }
}
