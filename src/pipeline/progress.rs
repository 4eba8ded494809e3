//! Progress reporting side channel
//!
//! The orchestrator calls an optional callback at every phase change. Nothing
//! in the pipeline depends on what the callback does with the events.

use crate::pipeline::state::PipelineState;

/// Callback invoked with each progress event
pub type ProgressCallback = Box<dyn FnMut(&ProgressEvent) + Send>;

/// Pipeline progress events
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    StateChanged {
        from: PipelineState,
        to: PipelineState,
    },
    PairStarted {
        index: usize,
        total: usize,
        rfp_files: Vec<String>,
        proposal: String,
    },
    Paginated {
        rfp_pages: usize,
        proposal_pages: usize,
    },
    SectionsExtracted {
        count: usize,
    },
    PairSkipped {
        index: usize,
        reason: String,
    },
    SectionMatched {
        index: usize,
        total: usize,
        matched: bool,
    },
    Finished {
        records: usize,
    },
}

impl ProgressEvent {
    /// One-line status text for terminal display
    pub fn describe(&self) -> String {
        match self {
            ProgressEvent::StateChanged { to, .. } => format!("{}...", to.display_name()),
            ProgressEvent::PairStarted {
                index,
                total,
                rfp_files,
                proposal,
            } => format!(
                "Pair {}/{}: {} -> {}",
                index + 1,
                total,
                rfp_files.join(", "),
                proposal
            ),
            ProgressEvent::Paginated {
                rfp_pages,
                proposal_pages,
            } => format!(
                "Split into {} RFP page(s) and {} proposal page(s)",
                rfp_pages, proposal_pages
            ),
            ProgressEvent::SectionsExtracted { count } => {
                format!("Found {} RFP section(s)", count)
            }
            ProgressEvent::PairSkipped { index, reason } => {
                format!("Skipping pair {}: {}", index + 1, reason)
            }
            ProgressEvent::SectionMatched {
                index,
                total,
                matched,
            } => format!(
                "Section {}/{}: {}",
                index + 1,
                total,
                if *matched { "answer found" } else { "no answer" }
            ),
            ProgressEvent::Finished { records } => {
                format!("Generated {} training example(s)", records)
            }
        }
    }
}
