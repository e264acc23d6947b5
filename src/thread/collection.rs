use std::fmt;

/// Number of pages a thread spans, always at least one
///
/// Resolved once per thread from the first page and never revised while
/// the crawl runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageCount(u32);

impl PageCount {
    /// A single page, used when the pager cannot be read
    pub const ONE: PageCount = PageCount(1);

    /// Creates a page count, returning `None` for zero
    pub fn new(count: u32) -> Option<Self> {
        if count == 0 {
            None
        } else {
            Some(Self(count))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Iterates page indices `1..=count`
    pub fn indices(self) -> impl Iterator<Item = u32> {
        1..=self.0
    }
}

impl Default for PageCount {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for PageCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// All entries of one thread, in page-major then document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryCollection {
    /// Display title, read from the last fetched page
    pub title: String,

    /// Entry texts, trimmed; duplicates are kept
    pub entries: Vec<String>,

    /// Number of pages fetched to build this collection
    pub pages_fetched: u32,
}

impl EntryCollection {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
