//! Data Table view state
//!
//! [`DataTable`] holds the search term, current page and row cursor for one
//! table instance. It never owns or mutates the records: every query takes
//! the caller's slice and derives the filtered set and visible page from it.
//!
//! Filtering is a case-insensitive substring match against the string form
//! of each configured column. Pagination uses a fixed page size and is
//! clamped to `1..=total_pages` whenever the filtered set is recomputed, so a
//! search or a shrinking dataset can never leave the table on a page past
//! the end.

use crate::model::Record;

/// Default rows per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Placeholder shown when the current page has no rows
pub const EMPTY_PLACEHOLDER: &str = "No records found";

/// Records that expose stringifiable fields by accessor name
pub trait Tabular {
    /// String form of the field, or `None` if the accessor is unknown
    fn field(&self, accessor: &str) -> Option<String>;
}

impl Tabular for Record {
    fn field(&self, accessor: &str) -> Option<String> {
        match accessor {
            "id" => Some(self.id.to_string()),
            "name" => Some(self.name.clone()),
            _ => None,
        }
    }
}

/// Column definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub header: String,
    pub accessor: String,
    /// Share of the table width, in percent
    pub width: u16,
}

impl Column {
    pub fn new(header: &str, accessor: &str, width: u16) -> Self {
        Self {
            header: header.to_string(),
            accessor: accessor.to_string(),
            width,
        }
    }
}

/// Footer figures for the current page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSummary {
    /// 1-based index of the first visible row, 0 when nothing matches
    pub first: usize,
    /// 1-based index of the last visible row
    pub last: usize,
    /// Number of records matching the search
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone)]
pub struct DataTable {
    columns: Vec<Column>,
    page_size: usize,
    search_term: String,
    current_page: usize,
    selected: usize,
}

impl DataTable {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            page_size: DEFAULT_PAGE_SIZE,
            search_term: String::new(),
            current_page: 1,
            selected: 0,
        }
    }

    /// Set rows per page; zero is treated as one
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Row cursor within the current page
    pub fn selected(&self) -> usize {
        self.selected
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Replace the search term; always returns to page 1
    pub fn set_search(&mut self, term: &str) {
        self.search_term = term.to_string();
        self.current_page = 1;
        self.selected = 0;
    }

    pub fn push_search_char(&mut self, c: char) {
        let mut term = std::mem::take(&mut self.search_term);
        term.push(c);
        self.set_search(&term);
    }

    pub fn pop_search_char(&mut self) {
        let mut term = std::mem::take(&mut self.search_term);
        term.pop();
        self.set_search(&term);
    }

    pub fn clear_search(&mut self) {
        self.set_search("");
    }

    /// True if any configured column contains the search term
    pub fn matches<T: Tabular>(&self, item: &T) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let needle = self.search_term.to_lowercase();
        self.columns.iter().any(|col| {
            item.field(&col.accessor)
                .is_some_and(|value| value.to_lowercase().contains(&needle))
        })
    }

    /// Records matching the search, in their original order
    pub fn filtered<'a, T: Tabular>(&self, data: &'a [T]) -> Vec<&'a T> {
        data.iter().filter(|item| self.matches(*item)).collect()
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    fn pages_for(&self, count: usize) -> usize {
        count.div_ceil(self.page_size).max(1)
    }

    pub fn total_pages<T: Tabular>(&self, data: &[T]) -> usize {
        self.pages_for(self.filtered(data).len())
    }

    /// Rows visible on the current page
    pub fn current_data<'a, T: Tabular>(&self, data: &'a [T]) -> Vec<&'a T> {
        let filtered = self.filtered(data);
        let page = self.current_page.min(self.pages_for(filtered.len()));
        filtered
            .into_iter()
            .skip((page - 1) * self.page_size)
            .take(self.page_size)
            .collect()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next<T: Tabular>(&self, data: &[T]) -> bool {
        self.current_page < self.total_pages(data)
    }

    pub fn next_page<T: Tabular>(&mut self, data: &[T]) {
        let total = self.total_pages(data);
        self.go_to_page(self.current_page + 1, total);
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.current_page.saturating_sub(1), usize::MAX);
    }

    fn go_to_page(&mut self, page: usize, total_pages: usize) {
        let page = page.clamp(1, total_pages.max(1));
        if page != self.current_page {
            self.current_page = page;
            self.selected = 0;
        }
    }

    /// Re-clamp page and cursor after the dataset changed
    pub fn sync<T: Tabular>(&mut self, data: &[T]) {
        let total = self.total_pages(data);
        self.current_page = self.current_page.clamp(1, total);
        let rows = self.current_data(data).len();
        self.selected = self.selected.min(rows.saturating_sub(1));
    }

    pub fn summary<T: Tabular>(&self, data: &[T]) -> PageSummary {
        let total = self.filtered(data).len();
        let total_pages = self.pages_for(total);
        let page = self.current_page.min(total_pages);
        let first = if total == 0 {
            0
        } else {
            (page - 1) * self.page_size + 1
        };
        PageSummary {
            first,
            last: (page * self.page_size).min(total),
            total,
            page,
            total_pages,
        }
    }

    // =========================================================================
    // Row cursor
    // =========================================================================

    pub fn select_next<T: Tabular>(&mut self, data: &[T]) {
        let rows = self.current_data(data).len();
        if rows > 0 {
            self.selected = (self.selected + 1).min(rows - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_item<'a, T: Tabular>(&self, data: &'a [T]) -> Option<&'a T> {
        self.current_data(data).get(self.selected).copied()
    }
}
