//! Command-line argument parsing for rfptuner
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use crate::cli::config::Config;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// rfptuner - Build fine-tuning datasets from RFPs and their proposals
#[derive(Parser, Debug)]
#[command(name = "rfptuner")]
#[command(version)]
#[command(about = "Turn RFP/proposal document pairs into a chat fine-tuning dataset", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level: default (warnings), -v (info), -vv (debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only, no progress display)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Ollama model to use (overrides config)
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Ollama host (overrides config)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Ollama port (overrides config)
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract requirements, match answers, and write the JSONL dataset
    Generate(GenerateArgs),

    /// Check that the Ollama server is reachable and the model is installed
    Doctor,

    /// List models installed on the Ollama server
    Models,

    /// Display effective configuration
    Config,
}

/// Options for `generate`
#[derive(ClapArgs, Debug)]
pub struct GenerateArgs {
    /// RFP file(s) of a single pair
    #[arg(long, num_args = 1.., conflicts_with = "manifest")]
    pub rfp: Vec<PathBuf>,

    /// Proposal file of a single pair
    #[arg(long, conflicts_with = "manifest")]
    pub proposal: Option<PathBuf>,

    /// TOML manifest listing several pairs
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Page size in characters (overrides config)
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Output file (default: <output dir>/<prefix>_<timestamp>.jsonl)
    #[arg(short, long, conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Print the dataset to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,

    /// Skip the Ollama health check before running
    #[arg(long)]
    pub skip_preflight: bool,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Fold command-line overrides into the loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(model) = &self.model {
            config.ollama.model = model.clone();
        }
        if let Some(host) = &self.host {
            config.ollama.host = host.clone();
        }
        if let Some(port) = self.port {
            config.ollama.port = port;
        }
        if let Commands::Generate(generate) = &self.command {
            if let Some(chunk_size) = generate.chunk_size {
                config.pipeline.chunk_size = chunk_size;
            }
        }
    }
}

impl GenerateArgs {
    /// Either a manifest or at least one RFP file must be given
    pub fn validate(&self) -> Result<(), String> {
        if self.manifest.is_none() && self.rfp.is_empty() {
            return Err("Provide --rfp <FILE>... with --proposal <FILE>, or --manifest <FILE>".to_string());
        }
        Ok(())
    }
}

impl Verbosity {
    /// Default tracing filter for this level
    pub fn log_filter(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "rfptuner=info",
            Verbosity::VeryVerbose => "rfptuner=debug",
        }
    }

    /// Check if should show progress display
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }
}
