//! Pipeline orchestrator - main coordinator
//!
//! Runs Pager -> Section Extractor -> Section Matcher over every complete
//! document pair, strictly one model call at a time, and collects the
//! resulting training records in pair order, then section order.

use crate::errors::{Result, TunerError};
use crate::llm::{LanguageModel, DEFAULT_MODEL, DEFAULT_OLLAMA_URL};
use crate::pipeline::extractor::SectionExtractor;
use crate::pipeline::matcher::SectionMatcher;
use crate::pipeline::pager::{paginate, DEFAULT_CHUNK_SIZE};
use crate::pipeline::progress::{ProgressCallback, ProgressEvent};
use crate::pipeline::state::{PipelineEvent, PipelineState};
use crate::types::{DocumentPair, TrainingRecord};
use async_trait::async_trait;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Fixed settings for one pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Ollama base URL
    pub ollama_url: String,

    /// Model name
    pub model: String,

    /// Page size in characters
    pub chunk_size: usize,

    /// Sampling temperature
    pub temperature: f32,

    /// Context window requested from the backend
    pub num_ctx: u32,

    /// Per-call HTTP timeout
    pub request_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            temperature: 0.1,
            num_ctx: 4096,
            request_timeout: Duration::from_secs(300),
        }
    }
}

/// Counters collected during a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub pairs_total: usize,
    pub pairs_excluded: usize,
    pub pairs_processed: usize,
    pub pairs_without_sections: usize,
    pub rfp_pages: usize,
    pub proposal_pages: usize,
    pub sections_extracted: usize,
    pub sections_matched: usize,
    pub model_calls: usize,
}

/// Non-fatal outcome worth telling the user about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunWarning {
    NoValidSections,
}

impl fmt::Display for RunWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunWarning::NoValidSections => write!(
                f,
                "No valid sections extracted: no RFP section could be matched to an answer in its proposal"
            ),
        }
    }
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub records: Vec<TrainingRecord>,
    pub state: PipelineState,
    pub warning: Option<RunWarning>,
    pub stats: RunStats,
}

/// Main pipeline orchestrator
pub struct Pipeline {
    config: PipelineConfig,
    model: Arc<dyn LanguageModel>,
    progress: Option<ProgressCallback>,
    state: PipelineState,
}

impl Pipeline {
    /// Create new pipeline
    pub fn new(config: PipelineConfig, model: Arc<dyn LanguageModel>) -> Self {
        Self {
            config,
            model,
            progress: None,
            state: PipelineState::Idle,
        }
    }

    /// Attach a progress callback
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Get current state
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Get configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process every complete pair. Each call starts from `Idle`.
    ///
    /// Fails with `Connectivity` as soon as the backend is unreachable and
    /// with `NoCompletePairs` when there is nothing to do. Zero records is a
    /// successful run carrying a warning.
    pub async fn run(&mut self, pairs: &[DocumentPair]) -> Result<RunReport> {
        self.state = PipelineState::Idle;
        let mut stats = RunStats {
            pairs_total: pairs.len(),
            ..RunStats::default()
        };

        self.advance(PipelineEvent::StartRun)?;

        let complete: Vec<&DocumentPair> = pairs.iter().filter(|p| p.is_complete()).collect();
        stats.pairs_excluded = pairs.len() - complete.len();
        if stats.pairs_excluded > 0 {
            info!(excluded = stats.pairs_excluded, "ignoring incomplete document pairs");
        }

        if complete.is_empty() {
            self.advance(PipelineEvent::NoCompletePairs)?;
            return Err(TunerError::NoCompletePairs);
        }

        self.advance(PipelineEvent::FilesRead)?;

        let model = CountingModel::new(Arc::clone(&self.model));
        let mut records = Vec::new();

        for (index, pair) in complete.iter().enumerate() {
            if index > 0 {
                self.advance(PipelineEvent::NextPair)?;
            }

            let outcome = self
                .process_pair(&model, index, complete.len(), pair, &mut stats)
                .await;

            match outcome {
                Ok(found) => records.extend(found),
                Err(e) => {
                    stats.model_calls = model.calls();
                    warn!(error = %e, pair = index, "run aborted");
                    self.advance(PipelineEvent::Abort)?;
                    return Err(e);
                }
            }
        }

        self.advance(PipelineEvent::AllPairsDone)?;
        stats.model_calls = model.calls();

        let warning = if records.is_empty() {
            warn!("run finished without any training records");
            Some(RunWarning::NoValidSections)
        } else {
            None
        };

        self.emit(ProgressEvent::Finished {
            records: records.len(),
        });
        info!(records = records.len(), calls = stats.model_calls, "run complete");

        Ok(RunReport {
            records,
            state: self.state,
            warning,
            stats,
        })
    }

    async fn process_pair(
        &mut self,
        model: &CountingModel,
        index: usize,
        total: usize,
        pair: &DocumentPair,
        stats: &mut RunStats,
    ) -> Result<Vec<TrainingRecord>> {
        let proposal = pair.proposal().ok_or(TunerError::NoCompletePairs)?;

        self.emit(ProgressEvent::PairStarted {
            index,
            total,
            rfp_files: pair.rfp_files.iter().map(|d| d.name.clone()).collect(),
            proposal: proposal.name.clone(),
        });
        info!(pair = index, proposal = %proposal.name, "processing pair");

        let rfp_pages = paginate(&pair.combined_rfp_text(), self.config.chunk_size)?;
        let proposal_pages = paginate(&proposal.content, self.config.chunk_size)?;
        stats.rfp_pages += rfp_pages.len();
        stats.proposal_pages += proposal_pages.len();

        self.emit(ProgressEvent::Paginated {
            rfp_pages: rfp_pages.len(),
            proposal_pages: proposal_pages.len(),
        });
        self.advance(PipelineEvent::Paginated)?;

        let sections = SectionExtractor::new(model).extract(&rfp_pages).await?;
        stats.sections_extracted += sections.len();
        self.emit(ProgressEvent::SectionsExtracted {
            count: sections.len(),
        });

        if sections.is_empty() {
            stats.pairs_without_sections += 1;
            warn!(pair = index, "no sections extracted, skipping pair");
            self.emit(ProgressEvent::PairSkipped {
                index,
                reason: "no RFP sections extracted".to_string(),
            });
            self.advance(PipelineEvent::NoSections)?;
            return Ok(Vec::new());
        }

        self.advance(PipelineEvent::SectionsFound)?;

        let matcher = SectionMatcher::new(model);
        let mut records = Vec::new();

        for (section_index, section) in sections.iter().enumerate() {
            let found = matcher.find_match(section, &proposal_pages).await?;

            self.emit(ProgressEvent::SectionMatched {
                index: section_index,
                total: sections.len(),
                matched: found.is_some(),
            });

            if let Some(answer) = found {
                records.push(TrainingRecord::new(section.clone(), answer));
            }
        }

        stats.sections_matched += records.len();
        stats.pairs_processed += 1;
        self.advance(PipelineEvent::PairFinished)?;

        Ok(records)
    }

    /// Transition to new state and report it
    fn advance(&mut self, event: PipelineEvent) -> Result<()> {
        let from = self.state;
        let to = from.transition(event)?;
        self.state = to;
        self.emit(ProgressEvent::StateChanged { from, to });
        Ok(())
    }

    fn emit(&mut self, event: ProgressEvent) {
        if let Some(callback) = self.progress.as_mut() {
            callback(&event);
        }
    }
}

/// Pass-through model that counts calls for the run statistics
struct CountingModel {
    inner: Arc<dyn LanguageModel>,
    calls: AtomicUsize,
}

impl CountingModel {
    fn new(inner: Arc<dyn LanguageModel>) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl LanguageModel for CountingModel {
    async fn generate(&self, prompt: &str, json_mode: bool) -> Result<String> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inner.generate(prompt, json_mode).await
    }
}
