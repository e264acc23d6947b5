//! HTML parser for forum thread pages
//!
//! This module extracts from a thread page:
//! - The page count encoded in the pager element (`div.pager`)
//! - Entry texts (`li div.content`)
//! - The thread title (`h1#title a`)
//!
//! Parsing never fails outright. Missing elements show up as `None` or an
//! empty list and the caller decides what that means.

use scraper::{Html, Selector};

/// Pagination indicator
pub const PAGER_SELECTOR: &str = "div.pager";

/// Attribute holding the total page count on script-rendered pagers
pub const PAGE_COUNT_ATTR: &str = "data-pagecount";

/// Content container of each entry list item
pub const ENTRY_SELECTOR: &str = "li div.content";

/// Anchor holding the thread title
pub const TITLE_SELECTOR: &str = "h1#title a";

/// Content extracted from one thread page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadPage {
    /// Entry texts in document order, trimmed
    pub entries: Vec<String>,

    /// Thread title, if the title element is present
    pub title: Option<String>,
}

/// Parses a thread page and extracts its entries and title
///
/// # Example
///
/// ```
/// use thread_harvest::crawler::parse_thread_page;
///
/// let html = r#"<h1 id="title"><a href="/t">Topic</a></h1>
///     <ul><li><div class="content"> first </div></li></ul>"#;
/// let page = parse_thread_page(html);
/// assert_eq!(page.entries, vec!["first".to_string()]);
/// assert_eq!(page.title.as_deref(), Some("Topic"));
/// ```
pub fn parse_thread_page(html: &str) -> ThreadPage {
    let document = Html::parse_document(html);

    ThreadPage {
        entries: extract_entries(&document),
        title: extract_title(&document),
    }
}

/// Reads the page count from the pager element
///
/// Pagers that are filled in by script carry the total in a
/// `data-pagecount` attribute, which wins when it holds a usable number.
/// Otherwise the last
/// number token in the pager's serialized HTML is used, since rendered
/// pagers read "1 2 3 ... N".
///
/// # Returns
///
/// * `Some(n)` - The pager is present and yields a positive `u32`
/// * `None` - No pager, no digits, a zero, or a number too large
pub fn parse_page_count(html: &str) -> Option<u32> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(PAGER_SELECTOR).ok()?;

    let pager = document.select(&selector).next()?;
    pager
        .value()
        .attr(PAGE_COUNT_ATTR)
        .and_then(last_number_token)
        .or_else(|| last_number_token(&pager.html()))
}

/// Extracts entry texts in document order
fn extract_entries(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse(ENTRY_SELECTOR) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .collect()
}

/// Extracts the thread title text as rendered, surrounding whitespace included
fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse(TITLE_SELECTOR).ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>())
}

fn last_number_token(text: &str) -> Option<u32> {
    let token = text
        .split(|c: char| !c.is_ascii_digit())
        .filter(|token| !token.is_empty())
        .last()?;

    token.parse::<u32>().ok().filter(|&n| n > 0)
}
