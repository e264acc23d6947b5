//! Output module for harvested threads
//!
//! This module handles:
//! - Writing each thread's entries as a quoted CSV file
//! - Summarizing a run in a printable report

mod csv_output;
mod report;

pub use csv_output::{output_path, write_entries, write_thread_csv};
pub use report::{format_report, print_report, HarvestReport, ThreadOutcome, ThreadReport};
