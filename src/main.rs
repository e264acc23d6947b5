//! Thread-Harvest main entry point
//!
//! This is the command-line interface for the Thread-Harvest archiver.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use thread_harvest::config::{load_config_with_hash, thread_targets, Config};
use thread_harvest::crawler::run_harvest;
use thread_harvest::output::{output_path, print_report};
use thread_harvest::{FixedDelay, Harvester, Pacer};
use tracing_subscriber::EnvFilter;

/// Thread-Harvest: a polite forum thread archiver
///
/// Reads a list of forum threads from a TOML file, fetches every page of
/// each thread with a pause between requests, and writes the entries of
/// each thread to its own CSV file.
#[derive(Parser, Debug)]
#[command(name = "thread-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A polite forum thread archiver", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: PathBuf,

    /// Seconds to wait after each page request (fractions allowed)
    #[arg(short, long, value_name = "SECONDS", default_value_t = 1.0)]
    delay: f64,

    /// Directory for the CSV files (overrides the config)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and list the threads without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.directory));

    if cli.dry_run {
        return handle_dry_run(&config, &output_dir, cli.delay);
    }

    handle_harvest(&config, &output_dir, cli.delay).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("thread_harvest=info,warn"),
            1 => EnvFilter::new("thread_harvest=debug,info"),
            2 => EnvFilter::new("thread_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be harvested
fn handle_dry_run(config: &Config, output_dir: &Path, delay: f64) -> anyhow::Result<()> {
    let pacer = FixedDelay::from_secs_f64(delay)?;
    let targets = thread_targets(config)?;

    println!("=== Thread-Harvest Dry Run ===\n");
    println!("User Agent: {}", config.headers.user_agent);
    println!("Delay: {:.2}s after each page", pacer.delay().as_secs_f64());
    println!("Output: {}\n", output_dir.display());

    println!("Threads ({}):", targets.len());
    for target in &targets {
        println!(
            "  - {} -> {}",
            target.label,
            output_path(output_dir, &target.label).display()
        );
        println!("    * {}", target.thread);
    }

    println!("\n✓ Configuration is valid");
    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(config: &Config, output_dir: &Path, delay: f64) -> anyhow::Result<()> {
    let pacer = FixedDelay::from_secs_f64(delay)?;
    let harvester = Harvester::from_headers(&config.headers, pacer)?;

    let report = run_harvest(config, &harvester, output_dir).await?;
    print_report(&report);

    if report.has_failures() {
        anyhow::bail!(
            "{} of {} threads failed",
            report.failed(),
            report.threads.len()
        );
    }

    Ok(())
}
