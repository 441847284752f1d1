use itertools::Itertools;

use super::query::SearchQuery;

/// What the filter needs to know about a bookmark.
pub trait Searchable {
    /// Per-user display number, the ordering key of search results.
    fn user_bookmark_id(&self) -> i32;

    /// Text of the cached message.
    fn content(&self) -> &str;

    /// Whether the bookmark carries the tag `name` (already lowercased).
    fn has_tag(&self, name: &str) -> bool;
}

/// Keeps the bookmarks carrying every tag of `query` whose content contains
/// its text, ordered by `user_bookmark_id` ascending.
pub fn filter_bookmarks<'a, T: Searchable>(bookmarks: &'a [T], query: &SearchQuery) -> Vec<&'a T> {
    let needle = query.needle();
    bookmarks
        .iter()
        .filter(|b| query.tags.iter().all(|t| b.has_tag(t)))
        .filter(|b| needle.is_empty() || b.content().to_lowercase().contains(&needle))
        .sorted_by_key(|b| b.user_bookmark_id())
        .collect()
}
