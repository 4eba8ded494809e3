//! rfptuner - Main CLI Entry Point

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use rfptuner::{
    bootstrap::{model_matches, Bootstrap, BootstrapStatus, EXIT_CODE_SETUP_NEEDED},
    cli::{Args, Commands, Config, GenerateArgs, Verbosity},
    dataset,
    display::{self, ProgressDisplay},
    ingest::JobManifest,
    types::ensure_complete_pairs,
    OllamaClient, Pipeline, TunerError,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Exit code for failures other than setup problems
const EXIT_CODE_FAILURE: i32 = 1;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbosity());

    let mut config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    args.apply_overrides(&mut config);
    config.validate()?;

    match &args.command {
        Commands::Generate(generate) => run_generate(&args, generate, &config).await?,
        Commands::Doctor => run_doctor(&config).await?,
        Commands::Models => list_models(&config).await?,
        Commands::Config => show_config(&config)?,
    }

    Ok(())
}

fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run_generate(args: &Args, generate: &GenerateArgs, config: &Config) -> Result<()> {
    if let Err(message) = generate.validate() {
        display::show_error(&message);
        std::process::exit(EXIT_CODE_FAILURE);
    }

    // 1. Decode inputs
    let manifest = match &generate.manifest {
        Some(path) => JobManifest::load(path)?,
        None => JobManifest::single(
            generate.rfp.clone(),
            generate.proposal.iter().cloned().collect(),
        ),
    };

    let (pairs, failures) = manifest.decode_pairs();
    for failure in &failures {
        display::show_error(&format!("Pair {} excluded: {}", failure.index + 1, failure.error));
    }
    info!(pairs = pairs.len(), excluded = failures.len(), "inputs decoded");

    if let Err(e) = ensure_complete_pairs(&pairs) {
        display::show_error(&e.to_string());
        std::process::exit(EXIT_CODE_FAILURE);
    }

    // 2. Backend pre-flight
    let pipeline_config = config.pipeline_config();
    if !generate.skip_preflight {
        let bootstrap = Bootstrap::new(&pipeline_config.ollama_url, &pipeline_config.model);
        match bootstrap.check().await {
            Ok(BootstrapStatus::Ready) => {}
            Ok(BootstrapStatus::OllamaNotRunning) => {
                display::show_ollama_instructions(&pipeline_config.ollama_url);
                std::process::exit(EXIT_CODE_SETUP_NEEDED);
            }
            Ok(BootstrapStatus::ModelNotAvailable(model)) => {
                display::show_model_pull_instructions(&model);
                std::process::exit(EXIT_CODE_SETUP_NEEDED);
            }
            Err(e) => {
                display::show_error(&e.to_string());
                std::process::exit(EXIT_CODE_SETUP_NEEDED);
            }
        }
    }

    // 3. Run the pipeline
    let client = OllamaClient::with_config(&pipeline_config)?;
    let progress = ProgressDisplay::new(args.verbosity().show_progress());
    let mut pipeline =
        Pipeline::new(pipeline_config, Arc::new(client)).with_progress(progress.callback());

    let result = pipeline.run(&pairs).await;
    progress.finish();

    let report = match result {
        Ok(report) => report,
        Err(e @ TunerError::Connectivity { .. }) => {
            display::show_error(&e.to_string());
            std::process::exit(EXIT_CODE_SETUP_NEEDED);
        }
        Err(e @ TunerError::NoCompletePairs) => {
            display::show_error(&e.to_string());
            std::process::exit(EXIT_CODE_FAILURE);
        }
        Err(e) => return Err(e).context("Pipeline failed"),
    };

    if args.verbosity() != Verbosity::Quiet {
        display::show_stats(&report.stats);
    }

    if let Some(warning) = report.warning {
        display::show_warning(&warning.to_string());
        return Ok(());
    }

    // 4. Deliver the dataset
    if generate.stdout {
        println!("{}", dataset::to_jsonl(&report.records)?);
        return Ok(());
    }

    let output = generate
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(config));
    dataset::write_jsonl(&output, &report.records)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    display::show_success(&format!(
        "Wrote {} training example(s) to {}",
        report.records.len(),
        output.display()
    ));
    Ok(())
}

fn default_output_path(config: &Config) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    config
        .output_dir()
        .join(format!("{}_{}.jsonl", config.output.file_prefix, stamp))
}

async fn run_doctor(config: &Config) -> Result<()> {
    let ollama_url = config.ollama_url();
    let bootstrap = Bootstrap::new(&ollama_url, &config.ollama.model);

    match bootstrap.check().await? {
        BootstrapStatus::Ready => {
            display::show_success(&format!("Ollama reachable at {}", ollama_url));
            display::show_success(&format!("Model '{}' installed", config.ollama.model));
            Ok(())
        }
        BootstrapStatus::OllamaNotRunning => {
            display::show_ollama_instructions(&ollama_url);
            std::process::exit(EXIT_CODE_SETUP_NEEDED);
        }
        BootstrapStatus::ModelNotAvailable(model) => {
            display::show_success(&format!("Ollama reachable at {}", ollama_url));
            display::show_model_pull_instructions(&model);
            std::process::exit(EXIT_CODE_SETUP_NEEDED);
        }
    }
}

async fn list_models(config: &Config) -> Result<()> {
    let ollama_url = config.ollama_url();
    let bootstrap = Bootstrap::new(&ollama_url, &config.ollama.model);

    if !bootstrap.check_ollama_running().await {
        display::show_ollama_instructions(&ollama_url);
        std::process::exit(EXIT_CODE_SETUP_NEEDED);
    }

    let models = bootstrap.list_models().await?;
    if models.is_empty() {
        display::show_warning("No models installed");
    }
    for model in models {
        let marker = if model_matches(&model, &config.ollama.model) { "*" } else { " " };
        println!("{} {}", marker, model);
    }
    Ok(())
}

fn show_config(config: &Config) -> Result<()> {
    if let Some(path) = Config::default_path() {
        eprintln!("# default location: {}", path.display());
    }
    print!("{}", config.to_toml()?);
    Ok(())
}
