//! rfptuner - RFP/proposal fine-tuning dataset builder
//!
//! Converts pairs of RFP and proposal documents into chat-style
//! (requirement, answer) training examples using a local Ollama model.
//!
//! # Architecture
//!
//! - **llm**: Ollama generate client + lenient JSON parsing
//! - **pipeline**: pager, section extractor, section matcher, orchestrator
//! - **ingest / dataset**: file decoding in, JSONL out
//! - **cli / display / bootstrap**: command-line surface and backend checks

pub mod errors;
pub mod types;
pub mod llm;
pub mod pipeline;
pub mod dataset;
pub mod ingest;

// Re-export commonly used types
pub use errors::{Result, TunerError};
pub use llm::{LanguageModel, OllamaClient};
pub use pipeline::{Pipeline, PipelineConfig, RunReport};
pub use types::{Document, DocumentPair, TrainingRecord};

// Command-line surface
pub mod bootstrap;
pub mod cli;
pub mod display;
