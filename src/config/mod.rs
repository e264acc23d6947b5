//! Configuration module for Thread-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use thread_harvest::config::{load_config, thread_targets};
//! use std::path::Path;
//!
//! let config = load_config(Path::new("threads.toml")).unwrap();
//! for target in thread_targets(&config).unwrap() {
//!     println!("{} -> {}", target.label, target.thread);
//! }
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, HeadersConfig, OutputConfig, ThreadTarget};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::thread_targets;
