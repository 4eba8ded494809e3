//! Language-model module
//!
//! Provides the Ollama generate client and the lenient JSON response parser.

pub mod client;
pub mod parser;

// Re-export commonly used types
pub use client::{LanguageModel, OllamaClient, DEFAULT_MODEL, DEFAULT_OLLAMA_URL};
pub use parser::{parse_json, strip_code_fences};
