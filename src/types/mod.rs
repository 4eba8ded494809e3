//! Core data types
//!
//! Documents flow in, training records flow out.

pub mod document;
pub mod record;

pub use document::{ensure_complete_pairs, file_header, Document, DocumentPair};
pub use record::{ChatExample, ChatMessage, Role, TrainingRecord, USER_PROMPT_PREFIX};
