//! Extraction-and-matching pipeline
//!
//! raw text -> pages -> RFP sections -> matched proposal answers -> records

pub mod extractor;
pub mod matcher;
pub mod orchestrator;
pub mod pager;
pub mod progress;
pub mod prompts;
pub mod state;

// Re-export commonly used types
pub use extractor::SectionExtractor;
pub use matcher::{is_affirmative, SectionMatcher};
pub use orchestrator::{Pipeline, PipelineConfig, RunReport, RunStats, RunWarning};
pub use pager::{paginate, DEFAULT_CHUNK_SIZE};
pub use progress::{ProgressCallback, ProgressEvent};
pub use state::{PipelineEvent, PipelineState};
