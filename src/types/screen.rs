//! Explicit per-screen view state.
//!
//! Library surface for clients embedding this crate directly: the HTTP
//! handlers project pages server-side, while a native front end drives a
//! [`Screen`] through these transitions instead. Each dashboard screen
//! is a state struct with explicit transitions (fetch-start,
//! fetch-success, fetch-error, mutate-success) rather than ambient
//! mutable fields. A screen that has been disposed (the user navigated
//! away) discards any result that arrives afterwards.

use super::listing::{filter_paginate, PageView, Searchable};
use crate::config::DEFAULT_PAGE_NUMBER;

/// Lifecycle phase of a screen's data
#[derive(Debug, Clone, PartialEq)]
pub enum Phase<T> {
    /// A fetch cycle is in flight; previous rows are gone
    Loading,
    /// Rows from the last completed fetch cycle
    Ready(Vec<T>),
    /// The last fetch cycle failed; the message is shown as a notification
    Failed(String),
}

/// View state for one list screen.
///
/// Holds the full derived collection plus the search text and current page;
/// `visible()` projects the slice actually rendered.
#[derive(Debug)]
pub struct Screen<T> {
    phase: Phase<T>,
    search: String,
    page: u64,
    page_size: u64,
    disposed: bool,
}

impl<T: Searchable + Clone> Screen<T> {
    pub fn new(page_size: u64) -> Self {
        Self {
            phase: Phase::Loading,
            search: String::new(),
            page: DEFAULT_PAGE_NUMBER,
            page_size,
            disposed: false,
        }
    }

    pub fn phase(&self) -> &Phase<T> {
        &self.phase
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    /// A fetch cycle started.
    pub fn fetch_start(&mut self) {
        if self.disposed {
            return;
        }
        self.phase = Phase::Loading;
    }

    /// A fetch cycle completed.
    ///
    /// The current page is clamped against the new (possibly smaller)
    /// filtered collection, so a delete that empties the last page moves
    /// the screen back one page.
    pub fn fetch_success(&mut self, rows: Vec<T>) {
        if self.disposed {
            return;
        }
        self.phase = Phase::Ready(rows);
        self.page = self.visible().page;
    }

    /// A fetch cycle failed; the collection is treated as empty.
    pub fn fetch_error(&mut self, message: impl Into<String>) {
        if self.disposed {
            return;
        }
        self.phase = Phase::Failed(message.into());
    }

    /// A mutation was confirmed by the store; the screen re-enters the
    /// fetch cycle rather than patching rows locally.
    pub fn mutate_success(&mut self) {
        self.fetch_start();
    }

    /// The search text changed; always resets to page 1.
    pub fn set_search(&mut self, query: impl Into<String>) {
        if self.disposed {
            return;
        }
        self.search = query.into();
        self.page = DEFAULT_PAGE_NUMBER;
    }

    pub fn next_page(&mut self) {
        let total = self.visible().total_pages;
        if self.page < total {
            self.page += 1;
        }
    }

    pub fn previous_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// Stop accepting results; a fetch completing after this is discarded.
    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    /// Project the page currently rendered.
    ///
    /// Loading and failed phases project an empty collection.
    pub fn visible(&self) -> PageView<T> {
        let rows = match &self.phase {
            Phase::Ready(rows) => rows.clone(),
            Phase::Loading | Phase::Failed(_) => Vec::new(),
        };
        let query = (!self.search.is_empty()).then_some(self.search.as_str());
        filter_paginate(rows, query, self.page, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row(String);

    impl Searchable for Row {
        fn haystack(&self) -> String {
            self.0.clone()
        }
    }

    fn rows(n: usize) -> Vec<Row> {
        (0..n).map(|i| Row(format!("row-{i}"))).collect()
    }

    #[test]
    fn delete_on_last_page_clamps_current_page() {
        let mut screen = Screen::new(8);
        screen.fetch_success(rows(17));
        screen.next_page();
        screen.next_page();
        assert_eq!(screen.page(), 3);

        // one row deleted, refetch returns 16 rows: page 3 no longer exists
        screen.mutate_success();
        screen.fetch_success(rows(16));
        assert_eq!(screen.page(), 2);
        assert_eq!(screen.visible().data.len(), 8);
    }

    #[test]
    fn search_change_resets_to_page_one() {
        let mut screen = Screen::new(5);
        screen.fetch_success(rows(20));
        screen.next_page();
        assert_eq!(screen.page(), 2);

        screen.set_search("row-1");
        assert_eq!(screen.page(), 1);
    }

    #[test]
    fn fetch_error_projects_empty_collection() {
        let mut screen: Screen<Row> = Screen::new(5);
        screen.fetch_error("connection refused");
        assert!(matches!(screen.phase(), Phase::Failed(_)));
        assert!(screen.visible().data.is_empty());
        assert_eq!(screen.visible().total_pages, 0);
    }

    #[test]
    fn disposed_screen_discards_late_results() {
        let mut screen: Screen<Row> = Screen::new(5);
        screen.dispose();
        screen.fetch_success(rows(3));
        assert_eq!(*screen.phase(), Phase::Loading);
    }

    #[test]
    fn mutate_success_reenters_loading() {
        let mut screen = Screen::new(5);
        screen.fetch_success(rows(3));
        screen.mutate_success();
        assert_eq!(*screen.phase(), Phase::Loading);
    }
}
