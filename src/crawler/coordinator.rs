//! Multi-thread harvest orchestration
//!
//! Walks the configured threads in file order, harvesting each with the
//! shared [`Harvester`] and writing one CSV file per thread. Threads are
//! independent: a failure aborts only that thread and leaves no file.

use crate::config::{thread_targets, Config, ThreadTarget};
use crate::crawler::Harvester;
use crate::output::{output_path, write_thread_csv, HarvestReport, ThreadOutcome, ThreadReport};
use crate::HarvestError;
use chrono::Utc;
use std::path::Path;
use std::time::Instant;

/// Harvests every configured thread in order
///
/// # Arguments
///
/// * `config` - The validated configuration
/// * `harvester` - Harvester built from the configured headers
/// * `output_dir` - Directory for the per-thread CSV files; created if missing
///
/// # Returns
///
/// * `Ok(HarvestReport)` - Every thread was attempted; see the report for failures
/// * `Err(HarvestError)` - The config is invalid or the output directory cannot be created
///
/// # Example
///
/// ```no_run
/// use thread_harvest::config::load_config;
/// use thread_harvest::crawler::run_harvest;
/// use thread_harvest::{FixedDelay, Harvester};
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("threads.toml"))?;
/// let harvester = Harvester::from_headers(&config.headers, FixedDelay::default())?;
/// let report = run_harvest(&config, &harvester, Path::new("out")).await?;
/// println!("{} threads written", report.succeeded());
/// # Ok(())
/// # }
/// ```
pub async fn run_harvest(
    config: &Config,
    harvester: &Harvester,
    output_dir: &Path,
) -> Result<HarvestReport, HarvestError> {
    let targets = thread_targets(config)?;
    std::fs::create_dir_all(output_dir)?;

    let mut report = HarvestReport::new(Utc::now());
    let start = Instant::now();

    for (position, target) in targets.iter().enumerate() {
        tracing::info!(
            "Harvesting thread {}/{}: {} ({})",
            position + 1,
            targets.len(),
            target.label,
            target.thread
        );

        let outcome = match harvest_target(harvester, target, output_dir).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Thread {} failed: {}", target.label, e);
                ThreadOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };

        report.threads.push(ThreadReport {
            label: target.label.clone(),
            url: target.thread.to_string(),
            outcome,
        });
    }

    report.elapsed = start.elapsed();
    tracing::info!(
        "Harvest finished: {} of {} threads written in {:.2}s",
        report.succeeded(),
        report.threads.len(),
        report.elapsed.as_secs_f64()
    );

    Ok(report)
}

async fn harvest_target(
    harvester: &Harvester,
    target: &ThreadTarget,
    output_dir: &Path,
) -> Result<ThreadOutcome, HarvestError> {
    let collection = harvester.harvest(&target.thread).await?;

    let path = output_path(output_dir, &target.label);
    write_thread_csv(&path, &collection)?;
    tracing::info!(
        "Wrote {} entries of \"{}\" to {}",
        collection.len(),
        collection.title,
        path.display()
    );

    Ok(ThreadOutcome::Written {
        path,
        title: collection.title,
        pages: collection.pages_fetched,
        entries: collection.entries.len(),
    })
}
