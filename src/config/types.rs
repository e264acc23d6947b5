use crate::thread::ThreadRef;
use serde::Deserialize;

/// Main configuration structure for Thread-Harvest
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Label -> thread base URL, kept in file order
    pub threads: toml::Table,

    pub headers: HeadersConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Request headers sent with every page fetch
///
/// `user-agent` is the only header; any other key is rejected.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeadersConfig {
    /// User-Agent the forum sees
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory the per-thread CSV files are written to
    #[serde(default = "default_output_directory")]
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
        }
    }
}

fn default_output_directory() -> String {
    ".".to_string()
}

/// One configured thread, ready to harvest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadTarget {
    /// Label from the config; also the output file stem
    pub label: String,

    pub thread: ThreadRef,
}
