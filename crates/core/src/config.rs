//! Configuration management for the triage pipeline.
//!
//! Configuration is merged from three sources, later ones winning:
//! - Optional YAML config file (`triage.yaml`)
//! - Environment variables (`TRIAGE_*`)
//! - Command-line flags
//!
//! The pipeline clients receive an immutable snapshot of this struct at
//! construction; nothing reads ambient state after startup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Default top-K for similarity queries.
pub const DEFAULT_TOP_K: u32 = 10;

/// Embedding provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingSettings {
    /// Embedding endpoint URL
    pub url: String,

    /// Bearer token for the embedding provider
    pub api_key: String,

    /// Embedding model identifier
    pub model: String,
}

/// Vector search provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Similarity query endpoint URL
    pub url: String,

    /// `api-key` header value for the search provider
    pub api_key: String,

    /// Number of passages to request per query
    pub top_k: u32,
}

/// Completion provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionSettings {
    /// Chat-completions endpoint URL
    pub url: String,

    /// Bearer token for the completion provider
    pub api_key: String,

    /// Completion model identifier
    pub model: String,
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Embedding provider settings
    pub embedding: EmbeddingSettings,

    /// Vector search provider settings
    pub search: SearchSettings,

    /// Completion provider settings
    pub completion: CompletionSettings,

    /// Cap on the concatenated context passed to the completion model.
    /// Truncation happens at passage boundaries; `None` means unlimited.
    pub max_context_chars: Option<usize>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            embedding: EmbeddingSettings {
                url: String::new(),
                api_key: String::new(),
                model: "text-embedding-ada-002".to_string(),
            },
            search: SearchSettings {
                url: String::new(),
                api_key: String::new(),
                top_k: DEFAULT_TOP_K,
            },
            completion: CompletionSettings {
                url: String::new(),
                api_key: String::new(),
                model: "gpt-4".to_string(),
            },
            max_context_chars: None,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

/// Config file structure (`triage.yaml`).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    embedding: Option<ProviderFileSection>,
    search: Option<SearchFileSection>,
    completion: Option<ProviderFileSection>,
    context: Option<ContextFileSection>,
    logging: Option<LoggingFileSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProviderFileSection {
    url: Option<String>,
    #[serde(rename = "apiKey")]
    api_key: Option<String>,
    model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SearchFileSection {
    url: Option<String>,
    #[serde(rename = "apiKey")]
    api_key: Option<String>,
    #[serde(rename = "topK")]
    top_k: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ContextFileSection {
    #[serde(rename = "maxChars")]
    max_chars: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingFileSection {
    level: Option<String>,
    color: Option<bool>,
}

impl AppConfig {
    /// Load configuration from the config file and environment variables.
    ///
    /// Environment variables:
    /// - `TRIAGE_CONFIG`: Path to config file (default: `./triage.yaml`)
    /// - `TRIAGE_EMBEDDING_URL` / `TRIAGE_EMBEDDING_API_KEY` / `TRIAGE_EMBEDDING_MODEL`
    /// - `TRIAGE_SEARCH_URL` / `TRIAGE_SEARCH_API_KEY` / `TRIAGE_SEARCH_TOP_K`
    /// - `TRIAGE_COMPLETION_URL` / `TRIAGE_COMPLETION_API_KEY` / `TRIAGE_COMPLETION_MODEL`
    /// - `TRIAGE_MAX_CONTEXT_CHARS`: Context character cap
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(config_file) = std::env::var("TRIAGE_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        // YAML config file first, environment variables override it
        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("triage.yaml"));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        if let Ok(url) = std::env::var("TRIAGE_EMBEDDING_URL") {
            config.embedding.url = url;
        }
        if let Ok(key) = std::env::var("TRIAGE_EMBEDDING_API_KEY") {
            config.embedding.api_key = key;
        }
        if let Ok(model) = std::env::var("TRIAGE_EMBEDDING_MODEL") {
            config.embedding.model = model;
        }

        if let Ok(url) = std::env::var("TRIAGE_SEARCH_URL") {
            config.search.url = url;
        }
        if let Ok(key) = std::env::var("TRIAGE_SEARCH_API_KEY") {
            config.search.api_key = key;
        }
        if let Ok(top_k) = std::env::var("TRIAGE_SEARCH_TOP_K") {
            config.search.top_k = top_k
                .parse()
                .map_err(|_| AppError::Config(format!("Invalid TRIAGE_SEARCH_TOP_K: {}", top_k)))?;
        }

        if let Ok(url) = std::env::var("TRIAGE_COMPLETION_URL") {
            config.completion.url = url;
        }
        if let Ok(key) = std::env::var("TRIAGE_COMPLETION_API_KEY") {
            config.completion.api_key = key;
        }
        if let Ok(model) = std::env::var("TRIAGE_COMPLETION_MODEL") {
            config.completion.model = model;
        }

        if let Ok(max_chars) = std::env::var("TRIAGE_MAX_CONTEXT_CHARS") {
            config.max_context_chars = Some(max_chars.parse().map_err(|_| {
                AppError::Config(format!("Invalid TRIAGE_MAX_CONTEXT_CHARS: {}", max_chars))
            })?);
        }

        config.log_level = std::env::var("RUST_LOG").ok();

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(embedding) = config_file.embedding {
            if let Some(url) = embedding.url {
                result.embedding.url = url;
            }
            if let Some(key) = embedding.api_key {
                result.embedding.api_key = key;
            }
            if let Some(model) = embedding.model {
                result.embedding.model = model;
            }
        }

        if let Some(search) = config_file.search {
            if let Some(url) = search.url {
                result.search.url = url;
            }
            if let Some(key) = search.api_key {
                result.search.api_key = key;
            }
            if let Some(top_k) = search.top_k {
                result.search.top_k = top_k;
            }
        }

        if let Some(completion) = config_file.completion {
            if let Some(url) = completion.url {
                result.completion.url = url;
            }
            if let Some(key) = completion.api_key {
                result.completion.api_key = key;
            }
            if let Some(model) = completion.model {
                result.completion.model = model;
            }
        }

        if let Some(context) = config_file.context {
            if let Some(max_chars) = context.max_chars {
                result.max_context_chars = Some(max_chars);
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over both the config file and environment
    /// variables.
    pub fn with_overrides(
        mut self,
        config_file: Option<PathBuf>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Validate that every provider endpoint is configured.
    ///
    /// Called once at startup; the pipeline itself assumes a valid config.
    pub fn validate(&self) -> AppResult<()> {
        if self.embedding.url.is_empty() {
            return Err(AppError::Config(
                "Embedding endpoint URL is not configured (TRIAGE_EMBEDDING_URL)".to_string(),
            ));
        }
        if self.search.url.is_empty() {
            return Err(AppError::Config(
                "Search endpoint URL is not configured (TRIAGE_SEARCH_URL)".to_string(),
            ));
        }
        if self.completion.url.is_empty() {
            return Err(AppError::Config(
                "Completion endpoint URL is not configured (TRIAGE_COMPLETION_URL)".to_string(),
            ));
        }
        if self.search.top_k == 0 {
            return Err(AppError::Config("top_k must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> AppConfig {
        let mut config = AppConfig::default();
        config.embedding.url = "http://embed.example".to_string();
        config.search.url = "http://search.example".to_string();
        config.completion.url = "http://complete.example".to_string();
        config
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.embedding.model, "text-embedding-ada-002");
        assert_eq!(config.completion.model, "gpt-4");
        assert_eq!(config.search.top_k, DEFAULT_TOP_K);
        assert!(config.max_context_chars.is_none());
    }

    #[test]
    fn test_validate_requires_endpoints() {
        let config = AppConfig::default();
        assert!(config.validate().is_err());
        assert!(configured().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_top_k() {
        let mut config = configured();
        config.search.top_k = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("top_k"));
    }

    #[test]
    fn test_cli_overrides() {
        let config = configured().with_overrides(None, None, true, true);
        assert!(config.verbose);
        assert!(config.no_color);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_explicit_log_level_wins_over_verbose() {
        let config = configured().with_overrides(None, Some("trace".to_string()), true, false);
        assert_eq!(config.log_level.as_deref(), Some("trace"));
    }

    #[test]
    fn test_merge_yaml_sections() {
        let yaml = r#"
embedding:
  url: "http://embed.internal"
  apiKey: "emb-key"
search:
  url: "http://search.internal"
  apiKey: "search-key"
  topK: 3
completion:
  url: "http://llm.internal"
  apiKey: "llm-key"
  model: "gpt-4o"
context:
  maxChars: 8000
logging:
  level: "warn"
  color: false
"#;
        let dir = std::env::temp_dir().join("triage-config-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("triage.yaml");
        std::fs::write(&path, yaml).unwrap();

        let config = AppConfig::default().merge_yaml(&path).unwrap();
        assert_eq!(config.embedding.url, "http://embed.internal");
        assert_eq!(config.search.top_k, 3);
        assert_eq!(config.completion.model, "gpt-4o");
        assert_eq!(config.max_context_chars, Some(8000));
        assert_eq!(config.log_level.as_deref(), Some("warn"));
        assert!(config.no_color);
    }
}
