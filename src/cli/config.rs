//! Configuration management for rfptuner
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.rfptuner/config.toml

use crate::errors::{Result, TunerError};
use crate::llm::DEFAULT_MODEL;
use crate::pipeline::{PipelineConfig, DEFAULT_CHUNK_SIZE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Complete configuration for rfptuner
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ollama: OllamaConfig,
    pub pipeline: PipelineSettings,
    pub output: OutputConfig,
}

/// Ollama connection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    pub host: String,
    pub port: u16,
    pub model: String,
    pub request_timeout_secs: u64,
}

/// Model call and pagination settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    pub chunk_size: usize,
    pub temperature: f32,
    pub num_ctx: u32,
}

/// Where datasets are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: String,
    pub file_prefix: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 11434,
            model: DEFAULT_MODEL.to_string(),
            request_timeout_secs: 300,
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            temperature: 0.1,
            num_ctx: 4096,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
            file_prefix: "training_data".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| TunerError::Config(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| TunerError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Standard config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".rfptuner").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.ollama.model.trim().is_empty() {
            return Err(TunerError::Config("model must not be empty".to_string()));
        }

        if self.ollama.request_timeout_secs == 0 {
            return Err(TunerError::Config(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.pipeline.chunk_size == 0 {
            return Err(TunerError::Config(
                "chunk_size must be greater than 0".to_string(),
            ));
        }

        if self.pipeline.num_ctx == 0 {
            return Err(TunerError::Config(
                "num_ctx must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.pipeline.temperature) {
            return Err(TunerError::Config(
                "temperature must be between 0.0 and 2.0".to_string(),
            ));
        }

        Ok(())
    }

    /// Serialize as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| TunerError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Get Ollama base URL
    pub fn ollama_url(&self) -> String {
        format!("http://{}:{}", self.ollama.host, self.ollama.port)
    }

    /// Settings handed to the client and the pipeline
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            ollama_url: self.ollama_url(),
            model: self.ollama.model.clone(),
            chunk_size: self.pipeline.chunk_size,
            temperature: self.pipeline.temperature,
            num_ctx: self.pipeline.num_ctx,
            request_timeout: Duration::from_secs(self.ollama.request_timeout_secs),
        }
    }

    /// Expand tilde in paths
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Output directory path
    pub fn output_dir(&self) -> PathBuf {
        Self::expand_path(&self.output.directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.ollama.host, "127.0.0.1");
        assert_eq!(config.ollama.port, 11434);
        assert_eq!(config.pipeline.chunk_size, 10_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_zero_chunk_size() {
        let mut config = Config::default();
        config.pipeline.chunk_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_temperature() {
        let mut config = Config::default();
        config.pipeline.temperature = 3.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_model() {
        let mut config = Config::default();
        config.ollama.model = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[ollama]\nmodel = \"mistral\"\n\n[pipeline]\nchunk_size = 500\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.ollama.model, "mistral");
        assert_eq!(config.ollama.port, 11434);
        assert_eq!(config.pipeline.chunk_size, 500);
        assert_eq!(config.pipeline.num_ctx, 4096);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[pipeline]\nchunk_size = 0\n").unwrap();
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_pipeline_config() {
        let pipeline = Config::default().pipeline_config();
        assert_eq!(pipeline.ollama_url, "http://127.0.0.1:11434");
        assert_eq!(pipeline.request_timeout, Duration::from_secs(300));
        assert_eq!(pipeline, PipelineConfig::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let parsed: Config = toml::from_str(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_expand_path_without_tilde() {
        assert_eq!(Config::expand_path("/absolute/path"), PathBuf::from("/absolute/path"));
    }
}
