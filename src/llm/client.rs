//! Ollama API client
//!
//! One non-streaming `POST /api/generate` per call. No retries and no
//! connection reuse across calls is assumed by callers.

use crate::errors::{Result, TunerError};
use crate::pipeline::PipelineConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default Ollama API endpoint
pub const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Default model
pub const DEFAULT_MODEL: &str = "llama3";

/// A text-completion backend.
///
/// The pipeline only talks to this trait, so tests can swap in a scripted
/// model and the CLI can point the real client at any endpoint.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Complete `prompt`. With `json_mode` the backend is asked to constrain
    /// its output to a JSON value; the result is still raw text.
    async fn generate(&self, prompt: &str, json_mode: bool) -> Result<String>;
}

/// Ollama generate client
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
    num_ctx: u32,
}

impl OllamaClient {
    /// Create Ollama client from the pipeline configuration
    pub fn with_config(config: &PipelineConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| TunerError::Generic(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.ollama_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            num_ctx: config.num_ctx,
        })
    }

    /// Full URL of the generate endpoint
    pub fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }

    fn connectivity(&self, detail: impl Into<String>) -> TunerError {
        TunerError::Connectivity {
            endpoint: self.endpoint(),
            model: self.model.clone(),
            detail: detail.into(),
        }
    }

    fn build_request<'a>(&'a self, prompt: &'a str, json_mode: bool) -> GenerateRequest<'a> {
        GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            format: json_mode.then_some("json"),
            options: GenerateOptions {
                temperature: self.temperature,
                num_ctx: self.num_ctx,
            },
        }
    }
}

#[async_trait]
impl LanguageModel for OllamaClient {
    async fn generate(&self, prompt: &str, json_mode: bool) -> Result<String> {
        let url = self.endpoint();
        let request = self.build_request(prompt, json_mode);

        debug!(
            model = %self.model,
            json_mode,
            prompt_chars = prompt.len(),
            "sending generate request"
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() || e.is_request() {
                    self.connectivity(e.to_string())
                } else {
                    TunerError::Generic(format!("Failed to send request: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TunerError::Protocol { status, body });
        }

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|e| self.connectivity(format!("unreadable response body: {}", e)))?;

        payload
            .response
            .ok_or_else(|| self.connectivity("response payload has no `response` field"))
    }
}

/// Ollama generate request
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'static str>,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_ctx: u32,
}

/// Only the field the pipeline needs
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}
