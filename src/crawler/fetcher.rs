//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester:
//! - Building the HTTP client with the configured request headers
//! - GET requests for thread pages
//!
//! There is no retry logic. A transport error or a non-2xx status is
//! returned to the caller as-is.

use crate::config::HeadersConfig;
use crate::HarvestError;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;

/// Builds the header map sent with every request
///
/// # Arguments
///
/// * `config` - The header configuration
///
/// # Returns
///
/// * `Ok(HeaderMap)` - Headers containing at least `user-agent`
/// * `Err(HarvestError)` - The user agent is not a valid header value
pub fn build_request_headers(config: &HeadersConfig) -> Result<HeaderMap, HarvestError> {
    let user_agent = HeaderValue::from_str(&config.user_agent).map_err(|e| {
        HarvestError::Config(crate::ConfigError::InvalidHeader(format!(
            "user-agent: {}",
            e
        )))
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, user_agent);
    Ok(headers)
}

/// Builds an HTTP client that sends the configured headers
///
/// # Example
///
/// ```no_run
/// use thread_harvest::config::HeadersConfig;
/// use thread_harvest::crawler::build_http_client;
///
/// let headers = HeadersConfig {
///     user_agent: "Mozilla/5.0 (X11; Linux x86_64)".to_string(),
/// };
///
/// let client = build_http_client(&headers).unwrap();
/// ```
pub fn build_http_client(config: &HeadersConfig) -> Result<Client, HarvestError> {
    let headers = build_request_headers(config)?;

    Client::builder()
        .default_headers(headers)
        .gzip(true)
        .brotli(true)
        .build()
        .map_err(HarvestError::ClientBuild)
}

/// Fetches a page and returns its body
///
/// # Returns
///
/// * `Ok(String)` - Body of a 2xx response
/// * `Err(HarvestError::Http)` - The request or body read failed
/// * `Err(HarvestError::Status)` - The server answered with a non-2xx status
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, HarvestError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| HarvestError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(HarvestError::Status {
            url: url.to_string(),
            status,
        });
    }

    response.text().await.map_err(|source| HarvestError::Http {
        url: url.to_string(),
        source,
    })
}
