//! Configuration management for the advisor service.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{AdvisorError, Result};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub indexing: IndexingConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Indexing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexingConfig {
    /// Characters per chunk (not bytes!)
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Character overlap between consecutive chunks
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Upload extensions accepted by the loader
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,

    /// Maximum document size in MB
    #[serde(default = "default_max_document_size")]
    pub max_document_size_mb: usize,

    /// File patterns to include when ingesting a directory (glob syntax)
    #[serde(default = "default_include_patterns")]
    pub include_patterns: Vec<String>,

    /// File patterns to exclude when ingesting a directory (glob syntax)
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,
}

/// Search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Chunks retrieved per question
    #[serde(default = "default_k")]
    pub default_k: usize,

    /// Maximum results per query
    #[serde(default = "default_max_k")]
    pub max_k: usize,

    /// Maximum query string length in characters
    #[serde(default = "default_max_query_length")]
    pub max_query_length: usize,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding the metadata database
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Drop document records left over from a previous process
    #[serde(default = "default_true")]
    pub purge_stale_records: bool,
}

/// Generation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    /// API key; usually supplied via GOOGLE_API_KEY
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Candidate models, tried in order
    #[serde(default = "default_models")]
    pub models: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_sec: u64,

    /// Instruction placed at the top of every prompt
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions
fn default_chunk_size() -> usize {
    1000
}

fn default_chunk_overlap() -> usize {
    200
}

fn default_allowed_extensions() -> Vec<String> {
    vec![
        ".txt".to_string(),
        ".md".to_string(),
        ".pdf".to_string(),
        ".docx".to_string(),
        ".html".to_string(),
    ]
}

fn default_max_document_size() -> usize {
    10
}

fn default_include_patterns() -> Vec<String> {
    vec![
        "*.txt".to_string(),
        "*.md".to_string(),
        "*.pdf".to_string(),
        "*.docx".to_string(),
        "*.html".to_string(),
    ]
}

fn default_exclude_patterns() -> Vec<String> {
    vec![
        "**/node_modules/**".to_string(),
        "**/target/**".to_string(),
        "**/.git/**".to_string(),
        "**/build/**".to_string(),
        "**/dist/**".to_string(),
        "**/__pycache__/**".to_string(),
    ]
}

fn default_k() -> usize {
    5
}

fn default_max_k() -> usize {
    50
}

fn default_max_query_length() -> usize {
    2000
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_models() -> Vec<String> {
    vec![
        "gemini-2.5-flash".to_string(),
        "gemini-2.0-flash".to_string(),
        "gemini-flash-latest".to_string(),
    ]
}

fn default_request_timeout() -> u64 {
    60
}

fn default_system_prompt() -> String {
    "You are an Academic Adviser assistant at Carnegie Mellon University Africa. \
     You help students with questions about course registration, academic policies, \
     degree requirements, and academic planning.\n\n\
     Use the context below to answer student questions. If the context contains \
     relevant information, use it to provide a comprehensive answer. If you don't \
     have specific information, provide general guidance and suggest contacting the \
     academic advising office."
        .to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            allowed_extensions: default_allowed_extensions(),
            max_document_size_mb: default_max_document_size(),
            include_patterns: default_include_patterns(),
            exclude_patterns: default_exclude_patterns(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_k: default_k(),
            max_k: default_max_k(),
            max_query_length: default_max_query_length(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            purge_stale_records: default_true(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            models: default_models(),
            request_timeout_sec: default_request_timeout(),
            system_prompt: default_system_prompt(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl StorageConfig {
    /// Path of the SQLite metadata database
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(crate::core::xdg::DATABASE_FILE)
    }
}

impl ServerConfig {
    /// `host:port` string for binding
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| AdvisorError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    ///
    /// This method uses XDG Base Directory specification for file locations.
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. ADVISOR_CONFIG env var
    /// 2. XDG config file (~/.config/advisor/config.toml or ADVISOR_CONFIG_FILE)
    /// 3. Legacy ./advisor.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("ADVISOR_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("advisor.toml").exists() {
                Self::from_file("advisor.toml")?
            } else {
                Self::default()
            }
        };

        // Use the XDG data directory unless a location was chosen explicitly
        if config.storage.data_dir == default_data_dir() {
            config.storage.data_dir = xdg.data_dir.clone();
        }

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Indexing configuration
        if let Some(size) = parse_env("ADVISOR_CHUNK_SIZE") {
            self.indexing.chunk_size = size;
        }
        if let Some(overlap) = parse_env("ADVISOR_CHUNK_OVERLAP") {
            self.indexing.chunk_overlap = overlap;
        }

        // Storage configuration
        if let Ok(data_dir) = env::var("ADVISOR_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(data_dir);
        }

        // Search configuration
        if let Some(k) = parse_env("ADVISOR_DEFAULT_K") {
            self.search.default_k = k;
        }
        if let Some(k) = parse_env("ADVISOR_MAX_K") {
            self.search.max_k = k;
        }

        // Server configuration
        if let Ok(host) = env::var("ADVISOR_HOST") {
            self.server.host = host;
        }
        if let Some(port) = parse_env("ADVISOR_PORT") {
            self.server.port = port;
        }

        // Generation configuration
        if let Ok(models) = env::var("ADVISOR_MODELS") {
            let models: Vec<String> = models
                .split(',')
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .collect();
            if !models.is_empty() {
                self.llm.models = models;
            }
        }
        if let Ok(key) = env::var("GOOGLE_API_KEY") {
            if !key.trim().is_empty() {
                self.llm.api_key = Some(key);
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate indexing config
        if self.indexing.chunk_size == 0 {
            return Err(AdvisorError::ConfigError(
                "Chunk size must be non-zero".to_string(),
            ));
        }

        if self.indexing.chunk_overlap >= self.indexing.chunk_size {
            return Err(AdvisorError::ConfigError(
                "Chunk overlap must be less than chunk size".to_string(),
            ));
        }

        if self.indexing.allowed_extensions.is_empty() {
            return Err(AdvisorError::ConfigError(
                "At least one allowed extension is required".to_string(),
            ));
        }

        if self.indexing.max_document_size_mb == 0 {
            return Err(AdvisorError::ConfigError(
                "Max document size must be non-zero".to_string(),
            ));
        }

        // Validate search config
        if self.search.default_k == 0 {
            return Err(AdvisorError::ConfigError(
                "Default k must be non-zero".to_string(),
            ));
        }

        if self.search.default_k > self.search.max_k {
            return Err(AdvisorError::ConfigError(
                "Default k cannot exceed max k".to_string(),
            ));
        }

        if self.search.max_query_length == 0 {
            return Err(AdvisorError::ConfigError(
                "Max query length must be non-zero".to_string(),
            ));
        }

        // Validate llm config
        if self.llm.models.is_empty() {
            return Err(AdvisorError::ConfigError(
                "At least one candidate model is required".to_string(),
            ));
        }

        if self.llm.request_timeout_sec == 0 {
            return Err(AdvisorError::ConfigError(
                "Request timeout must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration (redacting sensitive values)
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Chunk size: {} chars", self.indexing.chunk_size);
        tracing::info!("  Chunk overlap: {} chars", self.indexing.chunk_overlap);
        tracing::info!(
            "  Allowed extensions: {}",
            self.indexing.allowed_extensions.join(", ")
        );
        tracing::info!("  Max document size: {} MB", self.indexing.max_document_size_mb);
        tracing::info!("  Data dir: {:?}", self.storage.data_dir);
        tracing::info!("  Default k: {}", self.search.default_k);
        tracing::info!("  Max k: {}", self.search.max_k);
        tracing::info!("  Models: {}", self.llm.models.join(" -> "));
        tracing::info!(
            "  API key: {}",
            if self.llm.api_key.is_some() {
                "set"
            } else {
                "NOT SET"
            }
        );
        tracing::info!("  Listen: {}", self.server.bind_addr());
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|value| value.trim().parse().ok())
}
