//! Thread module: the values one harvest works on
//!
//! # Components
//!
//! - `ThreadRef`: the base URL of a thread, without the page parameter
//! - `PageCount`: how many pages a thread spans, resolved once
//! - `EntryCollection`: the ordered entries of a thread plus its title

mod collection;
mod reference;

pub use collection::{EntryCollection, PageCount};
pub use reference::{ThreadRef, PAGE_PARAM};
