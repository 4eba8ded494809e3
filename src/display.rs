//! Terminal rendering for the CLI
//!
//! Spinner-based progress driven by pipeline events, plus colored summaries
//! and setup instructions. Log output goes through `tracing` instead.

use crate::pipeline::{ProgressCallback, ProgressEvent, RunStats};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner that follows pipeline progress
pub struct ProgressDisplay {
    bar: Option<ProgressBar>,
}

impl ProgressDisplay {
    /// Create a display; a disabled one renders nothing
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} [{elapsed}] {msg}") {
            bar.set_style(style);
        }
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar: Some(bar) }
    }

    /// Callback for `Pipeline::with_progress`
    pub fn callback(&self) -> ProgressCallback {
        let bar = self.bar.clone();
        Box::new(move |event: &ProgressEvent| {
            let Some(bar) = &bar else { return };
            match event {
                ProgressEvent::PairStarted { .. } | ProgressEvent::PairSkipped { .. } => {
                    bar.println(format!("{} {}", "→".cyan(), event.describe()));
                }
                _ => bar.set_message(event.describe()),
            }
        })
    }

    /// Stop the spinner and clear its line
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

/// Show a success message
pub fn show_success(message: &str) {
    eprintln!("{} {}", "✓".green().bold(), message);
}

/// Show a warning message
pub fn show_warning(message: &str) {
    eprintln!("{} {}", "Warning:".yellow().bold(), message);
}

/// Show an error message
pub fn show_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

/// Run statistics block
pub fn show_stats(stats: &RunStats) {
    eprintln!("{}", "Run summary".bold());
    eprintln!(
        "  Pairs:     {} processed, {} without sections, {} incomplete",
        stats.pairs_processed, stats.pairs_without_sections, stats.pairs_excluded
    );
    eprintln!(
        "  Pages:     {} RFP, {} proposal",
        stats.rfp_pages, stats.proposal_pages
    );
    eprintln!(
        "  Sections:  {} extracted, {} matched",
        stats.sections_extracted, stats.sections_matched
    );
    eprintln!("  Model calls: {}", stats.model_calls);
}

/// Display installation instructions for Ollama
pub fn show_ollama_instructions(ollama_url: &str) {
    eprintln!("\n{} Ollama is not reachable at {}", "✗".red().bold(), ollama_url);
    eprintln!("\n{}", "Install:".bold());
    eprintln!("   Linux:   curl -fsSL https://ollama.com/install.sh | sh");
    eprintln!("   macOS:   brew install ollama");
    eprintln!("\n{}", "Start:".bold());
    eprintln!("   ollama serve");
    eprintln!("\nIf requests come from a browser origin, allow it with OLLAMA_ORIGINS.");
    eprintln!();
}

/// Display instructions for pulling a model
pub fn show_model_pull_instructions(model_tag: &str) {
    eprintln!("\n{} Model '{}' is not installed", "✗".red().bold(), model_tag);
    eprintln!("\nDownload it with:");
    eprintln!("   ollama pull {}", model_tag);
    eprintln!("\nOr choose another model with:");
    eprintln!("   rfptuner --model <model> generate ...");
    eprintln!();
}
