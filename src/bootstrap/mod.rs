//! Backend pre-flight checks
//!
//! Confirms the Ollama server answers and the configured model is installed
//! before a run spends time decoding and paginating documents.

use crate::errors::{Result, TunerError};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Process exit code when Ollama or the model still has to be set up
pub const EXIT_CODE_SETUP_NEEDED: i32 = 2;

const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Checks `GET /api/tags` on one Ollama server for one model
pub struct Bootstrap {
    http: Client,
    base_url: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct InstalledModels {
    #[serde(default)]
    models: Vec<InstalledModel>,
}

#[derive(Debug, Deserialize)]
struct InstalledModel {
    name: String,
}

/// Outcome of [`Bootstrap::check`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapStatus {
    Ready,
    OllamaNotRunning,
    ModelNotAvailable(String),
}

impl Bootstrap {
    pub fn new(base_url: &str, model: &str) -> Self {
        let http = Client::builder()
            .timeout(CHECK_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    fn tags_url(&self) -> String {
        format!("{}/api/tags", self.base_url)
    }

    /// True when the tags endpoint answers with a success status
    pub async fn check_ollama_running(&self) -> bool {
        self.http
            .get(self.tags_url())
            .send()
            .await
            .map(|response| response.status().is_success())
            .unwrap_or(false)
    }

    /// Names of the installed models, as Ollama reports them
    pub async fn list_models(&self) -> Result<Vec<String>> {
        let url = self.tags_url();
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| TunerError::Connectivity {
                endpoint: url.clone(),
                model: self.model.clone(),
                detail: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TunerError::Protocol {
                status: status.as_u16(),
                body,
            });
        }

        let installed: InstalledModels = response
            .json()
            .await
            .map_err(|e| TunerError::Generic(format!("Unreadable model list from {}: {}", url, e)))?;

        Ok(installed.models.into_iter().map(|m| m.name).collect())
    }

    pub async fn check_model_available(&self) -> Result<bool> {
        let installed = self.list_models().await?;
        Ok(installed.iter().any(|name| model_matches(name, &self.model)))
    }

    /// Server first, then model
    pub async fn check(&self) -> Result<BootstrapStatus> {
        if !self.check_ollama_running().await {
            return Ok(BootstrapStatus::OllamaNotRunning);
        }

        if self.check_model_available().await? {
            Ok(BootstrapStatus::Ready)
        } else {
            Ok(BootstrapStatus::ModelNotAvailable(self.model.clone()))
        }
    }
}

/// Exact tag match, or a bare name against its `:latest` tag
pub fn model_matches(installed: &str, wanted: &str) -> bool {
    installed == wanted || (!wanted.contains(':') && installed == format!("{}:latest", wanted))
}
