//! Session-scoped query state.
//!
//! A QuerySession holds what the user has typed and picked, and the page
//! they are on. Any change to the text, the selection or the sort key puts
//! the session back on page 1, since a page position means nothing once the
//! result set changes. Navigation clamps against the page count of the
//! most recent run.

use std::num::NonZeroUsize;

use job_data::{Facet, JobRecord};

use crate::error::{QueryError, Result};
use crate::paginate::{DEFAULT_PAGE_SIZE, clamp_page};
use crate::query::{QueryResult, run_pipeline};
use crate::selection::FilterSelection;
use crate::sort::SortKey;

#[derive(Debug, Clone)]
pub struct QuerySession {
    query_text: String,
    selection: FilterSelection,
    sort_key: SortKey,
    page: usize,
    page_size: NonZeroUsize,
    total_pages: usize,
}

impl QuerySession {
    /// Fresh session: empty text, no filters, relevance order, page 1.
    pub fn new(page_size: usize) -> Result<Self> {
        let page_size = NonZeroUsize::new(page_size).ok_or(QueryError::InvalidPageSize(page_size))?;
        Ok(Self {
            query_text: String::new(),
            selection: FilterSelection::new(),
            sort_key: SortKey::Relevance,
            page: 1,
            page_size,
            total_pages: 1,
        })
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    /// Page count from the last [`run`](Self::run); 1 before any run.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    // Inputs. Each resets to page 1 when it changes something.

    pub fn set_query_text(&mut self, text: &str) {
        if self.query_text != text {
            self.query_text = text.to_string();
            self.page = 1;
        }
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        if self.sort_key != key {
            self.sort_key = key;
            self.page = 1;
        }
    }

    /// Flip one facet value. Returns `true` if it is selected afterwards.
    pub fn toggle_facet(&mut self, facet: Facet, id: &str) -> Result<bool> {
        let selected = self.selection.toggle(facet, id)?;
        self.page = 1;
        Ok(selected)
    }

    pub fn set_location(&mut self, location: &str) {
        self.update_selection(|selection| selection.set_location(location));
    }

    pub fn set_selection(&mut self, selection: FilterSelection) {
        self.update_selection(|current| *current = selection);
    }

    pub fn clear_filters(&mut self) {
        self.update_selection(FilterSelection::clear);
    }

    fn update_selection(&mut self, change: impl FnOnce(&mut FilterSelection)) {
        let before = self.selection.clone();
        change(&mut self.selection);
        if self.selection != before {
            self.page = 1;
        }
    }

    // Navigation. All clamp into [1, total_pages].

    pub fn next_page(&mut self) -> usize {
        self.go_to(self.page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> usize {
        self.go_to(self.page.saturating_sub(1))
    }

    pub fn go_to(&mut self, page: usize) -> usize {
        self.page = clamp_page(page, self.total_pages);
        self.page
    }

    /// Run the current query against `jobs` and remember the page count.
    ///
    /// If the snapshot shrank since the last run and the current page no
    /// longer exists, the session moves to the last page first.
    pub fn run<'a>(&mut self, jobs: &'a [JobRecord]) -> QueryResult<'a> {
        let mut result = self.execute(jobs, self.page);
        self.total_pages = result.total_pages;
        if self.page > self.total_pages {
            self.page = self.total_pages;
            result = self.execute(jobs, self.page);
        }
        result
    }

    fn execute<'a>(&self, jobs: &'a [JobRecord], page: usize) -> QueryResult<'a> {
        run_pipeline(
            jobs,
            &self.query_text,
            &self.selection,
            self.sort_key,
            page,
            self.page_size,
        )
    }
}

impl Default for QuerySession {
    fn default() -> Self {
        Self {
            query_text: String::new(),
            selection: FilterSelection::new(),
            sort_key: SortKey::Relevance,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total_pages: 1,
        }
    }
}
