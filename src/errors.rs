//! Error types for rfptuner
//!
//! Separates infrastructure failures (the model backend cannot be reached)
//! from content failures (the model answered with something unusable).
//! Only the former abort a run.

use thiserror::Error;

/// Main error type for the dataset pipeline
#[derive(Error, Debug)]
pub enum TunerError {
    /// Backend unreachable or its response has the wrong shape
    #[error(
        "Cannot reach the Ollama server at {endpoint} ({detail}).\n\
         Make sure that:\n  \
         1. Ollama is running (start it with: ollama serve)\n  \
         2. OLLAMA_ORIGINS allows requests from this client if it runs behind a browser origin\n  \
         3. The model is installed (ollama pull {model})"
    )]
    Connectivity {
        endpoint: String,
        model: String,
        detail: String,
    },

    /// Backend reachable but answered with a non-success status
    #[error("Ollama API error: HTTP {status}: {body}")]
    Protocol { status: u16, body: String },

    /// Unreadable input file
    #[error("Failed to read {file}: {reason}")]
    Input { file: String, reason: String },

    /// Nothing to process
    #[error("No complete document pairs: each pair needs at least one RFP file and exactly one proposal file")]
    NoCompletePairs,

    /// Pipeline state machine misuse
    #[error("Invalid state transition from {from} via {event}")]
    InvalidTransition { from: String, event: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else, wrapped
    #[error("Model call failed: {0}")]
    Generic(String),
}

impl TunerError {
    /// True for failures that must abort the whole run
    pub fn is_connectivity(&self) -> bool {
        matches!(self, TunerError::Connectivity { .. })
    }
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, TunerError>;
