//! Pipeline state machine
//!
//! Linear per pair, looping back to `Paginating` for the next pair:
//! - Safety: no invalid states reachable
//! - Liveness: every run ends in `Complete` or `Failed`
//! - Determinism: unique next state per event

use crate::errors::{Result, TunerError};

/// Run states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineState {
    /// Nothing started yet
    Idle,

    /// Selecting complete pairs and assembling RFP text
    ReadingFiles,

    /// Splitting RFP and proposal text into pages
    Paginating,

    /// Asking the model for sections, page by page
    ExtractingRfpSections,

    /// Searching the proposal for each section
    MatchingProposal,

    /// Current pair finished, more may follow
    PairDone,

    /// All pairs processed (terminal)
    Complete,

    /// Aborted on connectivity failure or no work (terminal)
    Failed,
}

/// Events that trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineEvent {
    StartRun,
    FilesRead,
    NoCompletePairs,
    Paginated,
    SectionsFound,
    NoSections,
    PairFinished,
    NextPair,
    AllPairsDone,
    Abort,
}

impl PipelineState {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Complete | PipelineState::Failed)
    }

    /// Attempt state transition with validation
    ///
    /// Valid transitions:
    /// 1.  Idle                  → ReadingFiles          (on: StartRun)
    /// 2.  ReadingFiles          → Paginating            (on: FilesRead)
    /// 3.  ReadingFiles          → Failed                (on: NoCompletePairs)
    /// 4.  Paginating            → ExtractingRfpSections (on: Paginated)
    /// 5.  ExtractingRfpSections → MatchingProposal      (on: SectionsFound)
    /// 6.  ExtractingRfpSections → PairDone              (on: NoSections)
    /// 7.  MatchingProposal      → PairDone              (on: PairFinished)
    /// 8.  PairDone              → Paginating            (on: NextPair)
    /// 9.  PairDone              → Complete              (on: AllPairsDone)
    /// 10. non-terminal          → Failed                (on: Abort)
    pub fn transition(&self, event: PipelineEvent) -> Result<PipelineState> {
        use PipelineEvent::*;
        use PipelineState::*;

        let next_state = match (self, event) {
            (Idle, StartRun) => ReadingFiles,

            (ReadingFiles, FilesRead) => Paginating,
            (ReadingFiles, NoCompletePairs) => Failed,

            (Paginating, Paginated) => ExtractingRfpSections,

            (ExtractingRfpSections, SectionsFound) => MatchingProposal,
            (ExtractingRfpSections, NoSections) => PairDone,

            (MatchingProposal, PairFinished) => PairDone,

            (PairDone, NextPair) => Paginating,
            (PairDone, AllPairsDone) => Complete,

            (state, Abort) if !state.is_terminal() => Failed,

            (from, event) => {
                return Err(TunerError::InvalidTransition {
                    from: format!("{:?}", from),
                    event: format!("{:?}", event),
                });
            }
        };

        Ok(next_state)
    }

    /// Human-readable state name
    pub fn display_name(&self) -> &'static str {
        match self {
            PipelineState::Idle => "Idle",
            PipelineState::ReadingFiles => "Reading files",
            PipelineState::Paginating => "Paginating",
            PipelineState::ExtractingRfpSections => "Extracting RFP sections",
            PipelineState::MatchingProposal => "Matching proposal",
            PipelineState::PairDone => "Pair done",
            PipelineState::Complete => "Complete",
            PipelineState::Failed => "Failed",
        }
    }
}
