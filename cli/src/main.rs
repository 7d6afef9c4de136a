//! CLI entrypoint for riddle-rag
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use riddle_application::{
    AnswerQuestionUseCase, NoProgress, PipelineProgress, RunBatchUseCase, SearchProvider,
};
use riddle_infrastructure::{
    ConfigLoader, Credentials, FileConfig, JsonlResultWriter, OpenAiGenerator, OpenAiGeneratorConfig,
    SearchProviderKind, TraceLogWriter, build_search_provider, format_search_results,
    load_questions,
};
use riddle_presentation::{Cli, ProgressReporter, SimpleProgress, SummaryFormatter};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// References printed by `--dry-search`.
const DRY_SEARCH_RESULTS: usize = 5;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so the file writer flushes on exit
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    info!("Starting riddle-rag");

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()?
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };
    apply_cli_overrides(&mut config, &cli)?;
    let credentials = Credentials::from_env()?;

    // === Dependency Injection ===
    let search: Arc<dyn SearchProvider> = build_search_provider(&config.search, &credentials)?;

    if let Some(query) = &cli.dry_search {
        let response = search.web_search(query, config.pipeline.top_k).await;
        if let Some(error) = &response.error {
            eprintln!("Search failed: {}", error);
        }
        println!(
            "{}",
            format_search_results(&response, DRY_SEARCH_RESULTS, true)
        );
        return Ok(());
    }

    // Report a missing key before any question is processed
    credentials.check(config.search.provider)?;

    let generator = Arc::new(OpenAiGenerator::new(OpenAiGeneratorConfig::from_file_config(
        &config.generator,
        credentials.openai_api_key()?,
    ))?);
    info!("Using model {}", generator.model());

    // Input problems are fatal before any question is processed
    let questions = load_questions(&config.paths.input)?;

    let output_path = config.paths.output.clone();
    let trace_path = config.paths.trace_path();
    let mut results = JsonlResultWriter::create(&output_path)
        .with_context(|| format!("Cannot create output file {}", output_path.display()))?;
    let traces = TraceLogWriter::new(&trace_path);

    if !cli.quiet {
        println!();
        println!("+============================================================+");
        println!("|           riddle-rag - Riddle QA over Web Search           |");
        println!("+============================================================+");
        println!();
        println!("Questions: {} ({})", questions.len(), config.paths.input.display());
        println!("Search:    {}", config.search.provider);
        println!("Model:     {}", generator.model());
        println!();
    }

    let use_case = RunBatchUseCase::new(AnswerQuestionUseCase::new(
        generator,
        search,
        config.pipeline.to_params(),
    ));

    let progress: Box<dyn PipelineProgress> = if cli.quiet {
        Box::new(NoProgress)
    } else if cli.plain {
        Box::new(SimpleProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    let summary = use_case
        .execute_with_progress(&questions, &mut results, &traces, progress.as_ref())
        .await?;

    if !cli.quiet {
        println!(
            "{}",
            SummaryFormatter::format(&summary, &output_path, &trace_path)
        );
    }

    Ok(())
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` wins over the `-v` count. Logs go to stderr, and to
/// `log_file` as well when given.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            std::fs::create_dir_all(directory)
                .with_context(|| format!("Cannot create log directory {}", directory.display()))?;
            let file_name = path
                .file_name()
                .with_context(|| format!("Invalid log file path {}", path.display()))?;
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Command-line flags take precedence over every configuration source.
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) -> Result<()> {
    if let Some(input) = &cli.input {
        config.paths.input = input.clone();
    }
    if let Some(output) = &cli.output {
        config.paths.output = output.clone();
    }
    if let Some(trace) = &cli.trace {
        config.paths.trace = Some(trace.clone());
    }
    if let Some(provider) = &cli.provider {
        config.search.provider = provider
            .parse::<SearchProviderKind>()
            .map_err(anyhow::Error::msg)?;
    }
    Ok(())
}
