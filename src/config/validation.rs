use crate::config::types::{Config, HeadersConfig, OutputConfig, ThreadTarget};
use crate::thread::ThreadRef;
use crate::ConfigError;
use reqwest::header::HeaderValue;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_headers_config(&config.headers)?;
    validate_output_config(&config.output)?;
    thread_targets(config)?;
    Ok(())
}

/// Converts the `[threads]` table into targets, in file order
pub fn thread_targets(config: &Config) -> Result<Vec<ThreadTarget>, ConfigError> {
    if config.threads.is_empty() {
        return Err(ConfigError::Validation(
            "[threads] must list at least one thread".to_string(),
        ));
    }

    let mut targets = Vec::with_capacity(config.threads.len());
    for (label, value) in &config.threads {
        validate_label(label)?;

        let url = value.as_str().ok_or_else(|| {
            ConfigError::Validation(format!(
                "Thread '{}' must map to a URL string, got {}",
                label,
                value.type_str()
            ))
        })?;

        let thread = ThreadRef::parse(url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Thread '{}': {}", label, e)))?;

        targets.push(ThreadTarget {
            label: label.clone(),
            thread,
        });
    }

    Ok(targets)
}

/// Validates header configuration
fn validate_headers_config(config: &HeadersConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::InvalidHeader(
            "user-agent cannot be empty".to_string(),
        ));
    }

    HeaderValue::from_str(&config.user_agent).map_err(|e| {
        ConfigError::InvalidHeader(format!(
            "user-agent '{}' is not a valid header value: {}",
            config.user_agent, e
        ))
    })?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Labels become file names, so keep them to a portable character set
fn validate_label(label: &str) -> Result<(), ConfigError> {
    if label.is_empty() {
        return Err(ConfigError::Validation(
            "Thread label cannot be empty".to_string(),
        ));
    }

    if label.starts_with('.') {
        return Err(ConfigError::Validation(format!(
            "Thread label '{}' cannot start with '.'",
            label
        )));
    }

    if !label
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        return Err(ConfigError::Validation(format!(
            "Thread label '{}' must contain only alphanumeric characters, '-', '_' or '.'",
            label
        )));
    }

    Ok(())
}
