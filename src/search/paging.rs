use super::filter::Searchable;

/// Cursor value that makes [`Navigation::Forward`] land on the first result.
pub const LOOP_TO_FIRST: i32 = -1;
/// Cursor value that makes [`Navigation::Back`] land on the last result.
pub const LOOP_TO_LAST: i32 = 100_000_000;

/// Which result to display, relative to the currently displayed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Initial,
    /// The next result after the cursor, wrapping to the first.
    Forward(i32),
    /// The previous result before the cursor, wrapping to the last.
    Back(i32),
}

#[derive(Debug)]
pub struct Page<'a, T> {
    /// Every matching bookmark, ordered by `user_bookmark_id`.
    pub results: Vec<&'a T>,
    pub selected: &'a T,
    pub is_first: bool,
    pub is_last: bool,
}

impl<'a, T: Searchable> Page<'a, T> {
    /// Picks the bookmark to display out of `results`, which must be ordered
    /// by `user_bookmark_id` ascending. `None` when there are no results.
    pub fn select(results: Vec<&'a T>, navigation: Navigation) -> Option<Self> {
        let first = *results.first()?;
        let last = *results.last()?;

        let selected = match navigation {
            Navigation::Initial => first,
            Navigation::Forward(cursor) => results
                .iter()
                .copied()
                .find(|b| b.user_bookmark_id() > cursor)
                .unwrap_or(first),
            Navigation::Back(cursor) => results
                .iter()
                .rev()
                .copied()
                .find(|b| b.user_bookmark_id() < cursor)
                .unwrap_or(last),
        };
        let id = selected.user_bookmark_id();

        Some(Page {
            is_first: id == first.user_bookmark_id(),
            is_last: id == last.user_bookmark_id(),
            results,
            selected,
        })
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
