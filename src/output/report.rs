//! Run report for a multi-thread harvest

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of harvesting one thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadOutcome {
    /// The CSV file was written
    Written {
        path: PathBuf,
        title: String,
        pages: u32,
        entries: usize,
    },

    /// The thread was aborted; no file was written
    Failed { error: String },
}

/// Result of one configured thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadReport {
    pub label: String,
    pub url: String,
    pub outcome: ThreadOutcome,
}

/// Summary of a whole run
#[derive(Debug, Clone)]
pub struct HarvestReport {
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
    pub threads: Vec<ThreadReport>,
}

impl HarvestReport {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            elapsed: Duration::ZERO,
            threads: Vec::new(),
        }
    }

    pub fn succeeded(&self) -> usize {
        self.threads
            .iter()
            .filter(|t| matches!(t.outcome, ThreadOutcome::Written { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.threads.len() - self.succeeded()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    /// Total entries across all written threads
    pub fn total_entries(&self) -> usize {
        self.threads
            .iter()
            .map(|t| match t.outcome {
                ThreadOutcome::Written { entries, .. } => entries,
                ThreadOutcome::Failed { .. } => 0,
            })
            .sum()
    }

    /// Total pages fetched for written threads
    pub fn total_pages(&self) -> u64 {
        self.threads
            .iter()
            .map(|t| match t.outcome {
                ThreadOutcome::Written { pages, .. } => u64::from(pages),
                ThreadOutcome::Failed { .. } => 0,
            })
            .sum()
    }
}

/// Formats the report as plain text
pub fn format_report(report: &HarvestReport) -> String {
    let mut out = String::new();

    out.push_str("=== Harvest Report ===\n\n");
    out.push_str(&format!(
        "Started: {}\n",
        report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!(
        "Elapsed: {:.2}s\n\n",
        report.elapsed.as_secs_f64()
    ));

    out.push_str("Threads:\n");
    for thread in &report.threads {
        match &thread.outcome {
            ThreadOutcome::Written {
                path,
                title,
                pages,
                entries,
            } => out.push_str(&format!(
                "  [ok]     {} \"{}\": {} entries from {} pages -> {}\n",
                thread.label,
                title,
                entries,
                pages,
                path.display()
            )),
            ThreadOutcome::Failed { error } => out.push_str(&format!(
                "  [failed] {} ({}): {}\n",
                thread.label, thread.url, error
            )),
        }
    }
    out.push('\n');

    out.push_str(&format!(
        "Written: {} / {} threads, {} entries from {} pages\n",
        report.succeeded(),
        report.threads.len(),
        report.total_entries(),
        report.total_pages()
    ));

    out
}

/// Prints the report to stdout
pub fn print_report(report: &HarvestReport) {
    print!("{}", format_report(report));
}
