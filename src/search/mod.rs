//! Bookmark search: tag-prefix query parsing, tag/text filtering and the
//! wrap-around pagination over the filtered results.
//!
//! Everything in here is pure and works on a bookmark collection already
//! loaded in memory.

mod filter;
mod paging;
mod query;
pub mod validate;

pub use filter::{filter_bookmarks, Searchable};
pub use paging::{Navigation, Page, LOOP_TO_FIRST, LOOP_TO_LAST};
pub use query::{parse_tag_prefixes, SearchQuery, WILDCARD};

use tracing::debug;

use crate::utils::CommonError;

/// Filters `bookmarks` by `query` and picks the one to display.
pub fn filter_and_select<'a, T: Searchable>(
    bookmarks: &'a [T],
    query: &SearchQuery,
    navigation: Navigation,
) -> Result<Page<'a, T>, CommonError> {
    let results = filter_bookmarks(bookmarks, query);
    debug!(
        ?query,
        ?navigation,
        total = bookmarks.len(),
        matched = results.len(),
        "filtered bookmarks"
    );
    Page::select(results, navigation).ok_or(CommonError::EmptyResult)
}
