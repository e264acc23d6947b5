//! Single-thread harvesting
//!
//! A [`Harvester`] owns the HTTP client and the pacer. For one thread it
//! resolves the page count from the first page, then walks pages
//! `1..=count` in order, collecting entries and reading the title from the
//! last page.

use crate::config::HeadersConfig;
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::pacer::Pacer;
use crate::crawler::parser::{parse_page_count, parse_thread_page};
use crate::thread::{EntryCollection, PageCount, ThreadRef};
use crate::HarvestError;
use reqwest::Client;
use std::time::Instant;

/// Fetches and extracts thread pages
pub struct Harvester {
    client: Client,
    pacer: Box<dyn Pacer>,
}

impl Harvester {
    /// Creates a harvester from an existing client
    ///
    /// The client's default headers are the request headers of the crawl.
    pub fn new(client: Client, pacer: impl Pacer + 'static) -> Self {
        Self {
            client,
            pacer: Box::new(pacer),
        }
    }

    /// Creates a harvester with a client built from the header configuration
    pub fn from_headers(
        headers: &HeadersConfig,
        pacer: impl Pacer + 'static,
    ) -> Result<Self, HarvestError> {
        let client = build_http_client(headers)?;
        Ok(Self::new(client, pacer))
    }

    /// Resolves how many pages a thread spans
    ///
    /// Issues exactly one GET against the bare base URL. A page whose pager
    /// cannot be read counts as a single page; transport errors and non-2xx
    /// statuses are returned.
    pub async fn resolve_page_count(&self, thread: &ThreadRef) -> Result<PageCount, HarvestError> {
        let body = fetch_page(&self.client, thread.base_url()).await?;

        match parse_page_count(&body).and_then(PageCount::new) {
            Some(count) => {
                tracing::debug!("Thread {} spans {} pages", thread, count);
                Ok(count)
            }
            None => {
                tracing::warn!(
                    "No readable pager on {}, assuming a single page",
                    thread
                );
                Ok(PageCount::ONE)
            }
        }
    }

    /// Fetches pages `1..=page_count` and collects their entries
    ///
    /// # Request Flow
    ///
    /// For each page index, in order:
    /// 1. GET `<base>?p=<index>`
    /// 2. Pause through the pacer, after every page including the last
    /// 3. Append the page's entries in document order
    ///
    /// The title is read from the last page fetched.
    ///
    /// # Returns
    ///
    /// * `Ok(EntryCollection)` - All pages were fetched and the last page has a title
    /// * `Err(HarvestError)` - Any request failed or the title is missing; no
    ///   partial result is returned
    pub async fn crawl_entries(
        &self,
        thread: &ThreadRef,
        page_count: PageCount,
    ) -> Result<EntryCollection, HarvestError> {
        let expected = self.pacer.delay().as_secs_f64() * f64::from(page_count.get());
        tracing::info!(
            "Crawling {} pages of {} (expected time {:.2}s)",
            page_count,
            thread,
            expected
        );

        let start = Instant::now();
        let result = self.crawl_pages(thread, page_count).await;
        tracing::info!(
            "Total execution time: {:.2}s",
            start.elapsed().as_secs_f64()
        );

        result
    }

    /// Resolves the page count and crawls every page
    pub async fn harvest(&self, thread: &ThreadRef) -> Result<EntryCollection, HarvestError> {
        let page_count = self.resolve_page_count(thread).await?;
        self.crawl_entries(thread, page_count).await
    }

    async fn crawl_pages(
        &self,
        thread: &ThreadRef,
        page_count: PageCount,
    ) -> Result<EntryCollection, HarvestError> {
        let mut entries = Vec::new();
        let mut last_title = None;
        let mut last_url = thread.base_url().to_string();

        for index in page_count.indices() {
            let url = thread.page_url(index);
            tracing::debug!("Fetching page {}/{}: {}", index, page_count, url);

            let body = fetch_page(&self.client, &url).await?;
            self.pacer.pause().await;

            let page = parse_thread_page(&body);
            tracing::debug!("Page {} yielded {} entries", index, page.entries.len());

            entries.extend(page.entries);
            last_title = page.title;
            last_url = url;
        }

        let title = last_title.ok_or(HarvestError::MissingTitle { url: last_url })?;

        Ok(EntryCollection {
            title,
            entries,
            pages_fetched: page_count.get(),
        })
    }
}
