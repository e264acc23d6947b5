//! Crawler module for forum thread harvesting
//!
//! This module contains the core harvesting logic, including:
//! - HTTP fetching with the configured request headers
//! - HTML parsing of pagers, entries and titles
//! - Pacing between page requests
//! - Per-thread crawling and multi-thread coordination

mod coordinator;
mod fetcher;
mod harvester;
mod pacer;
mod parser;

pub use coordinator::run_harvest;
pub use fetcher::{build_http_client, build_request_headers, fetch_page};
pub use harvester::Harvester;
pub use pacer::{FixedDelay, NoDelay, Pacer, DEFAULT_DELAY};
pub use parser::{
    parse_page_count, parse_thread_page, ThreadPage, ENTRY_SELECTOR, PAGER_SELECTOR,
    PAGE_COUNT_ATTR, TITLE_SELECTOR,
};
