use crate::HarvestError;
use std::fmt;
use url::Url;

/// Query parameter carrying the page index
pub const PAGE_PARAM: &str = "p";

/// Reference to one discussion thread
///
/// Holds the base URL of the thread's first page exactly as given. Page URLs
/// are built by appending `?p=<index>` to that text, so the base must not
/// carry a query string of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadRef {
    base: String,
}

impl ThreadRef {
    /// Parses and validates a thread base URL
    ///
    /// # Arguments
    ///
    /// * `base` - URL of the thread's first page without the page parameter
    ///
    /// # Returns
    ///
    /// * `Ok(ThreadRef)` - The URL is an absolute http(s) URL without a query
    /// * `Err(HarvestError::InvalidThread)` - Anything else
    ///
    /// # Example
    ///
    /// ```
    /// use thread_harvest::ThreadRef;
    ///
    /// let thread = ThreadRef::parse("https://forum.example/some-thread--42").unwrap();
    /// assert_eq!(thread.page_url(3), "https://forum.example/some-thread--42?p=3");
    /// ```
    pub fn parse(base: &str) -> Result<Self, HarvestError> {
        let base = base.trim();
        let url = Url::parse(base)
            .map_err(|e| HarvestError::InvalidThread(format!("'{}': {}", base, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(HarvestError::InvalidThread(format!(
                "'{}': only http and https are supported",
                base
            )));
        }

        if url.query().is_some() {
            return Err(HarvestError::InvalidThread(format!(
                "'{}': base URL must not contain a query string",
                base
            )));
        }

        if url.fragment().is_some() {
            return Err(HarvestError::InvalidThread(format!(
                "'{}': base URL must not contain a fragment",
                base
            )));
        }

        Ok(Self {
            base: base.to_string(),
        })
    }

    /// The base URL, used for page-count resolution
    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// URL of the page with the given 1-based index
    pub fn page_url(&self, index: u32) -> String {
        format!("{}?{}={}", self.base, PAGE_PARAM, index)
    }
}

impl fmt::Display for ThreadRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}
