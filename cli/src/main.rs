//! CLI entrypoint for doc-council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{bail, Context, Result};
use clap::Parser;
use council_application::{NoProgress, RunReviewInput, RunReviewUseCase};
use council_domain::Model;
use council_infrastructure::providers::{OpenAiCompatConfig, OpenAiCompatGateway};
use council_infrastructure::{ConfigLoader, DocumentLoader};
use council_presentation::{Cli, ConsoleFormatter, OutputFormat, ProgressReporter};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };

    for issue in config.validate() {
        warn!("Config: {issue}");
    }

    // Load the document
    let document_path = match &cli.document {
        Some(path) => path,
        None => bail!("A document path is required. See --help for usage."),
    };
    let document = DocumentLoader::load(document_path)?;

    // Review guidelines from flag, file, or empty
    let context = if let Some(text) = &cli.context {
        text.clone()
    } else if let Some(path) = &cli.context_file {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read context file '{}'", path.display()))?
    } else {
        String::new()
    };

    let roster = config.to_roster().context("Invalid analyzer roster")?;
    let arbiter: Model = match &cli.arbiter {
        Some(s) => Model::from(s.as_str()),
        None => config.parse_arbiter(),
    };

    let mut params = config.review_params();
    if let Some(secs) = cli.timeout {
        params = params.with_call_timeout(std::time::Duration::from_secs(secs));
    }

    info!(
        document = %document.name(),
        analyzers = roster.len(),
        arbiter = %arbiter,
        "Starting doc-council review"
    );

    // === Dependency Injection ===
    let provider_config = OpenAiCompatConfig::from_env(
        &config.provider.api_key_env,
        config.provider.base_url.clone(),
    )?;
    let gateway = Arc::new(OpenAiCompatGateway::new(provider_config)?);

    // Print header
    if !cli.quiet {
        println!();
        println!("+============================================================+");
        println!("|           Doc Council - Document Review                    |");
        println!("+============================================================+");
        println!();
        println!("Document: {}", document.name());
        println!(
            "Analyzers: {}",
            roster
                .iter()
                .map(|a| a.name().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!("Arbiter: {arbiter}");
        println!();
    }

    let input = RunReviewInput::new(document, context, roster)
        .with_arbiter(arbiter)
        .with_params(params);

    // Ctrl-C cancels the run cleanly instead of killing it mid-call
    let cancel = CancellationToken::new();
    let ctrl_c_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_token.cancel();
        }
    });

    // Create use case with injected gateway
    let use_case = RunReviewUseCase::new(gateway);

    // Execute with or without progress reporting
    let run = if cli.quiet {
        use_case
            .execute_with_progress(input, &NoProgress, cancel)
            .await?
    } else {
        let progress = ProgressReporter::new();
        use_case
            .execute_with_progress(input, &progress, cancel)
            .await?
    };

    // Output results
    let output = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&run),
        OutputFormat::Summary => ConsoleFormatter::format_summary(&run),
        OutputFormat::Json => ConsoleFormatter::format_json(&run),
    };

    println!("{output}");

    Ok(())
}
