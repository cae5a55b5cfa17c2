//! The user-adjustable state of a list screen.
//!
//! [`QueryState`] gathers search text, sort chain, column filters, current
//! page and selection into one value. It is created fresh when a screen
//! opens, changed only through the setters below, and dropped when the
//! screen closes.

use serde::{Deserialize, Serialize};

use crate::error::{ListViewError, Result};
use crate::filter::ColumnFilter;
use crate::ordering::{Dir, SortKey};
use crate::record::RecordId;
use crate::selection::{self, Selection};
use crate::view::ViewResult;

/// Search, sort, filter, page and selection state of one list screen.
///
/// # Example
///
/// ```
/// use waffice_listview::{Dir, QueryState};
///
/// let mut query = QueryState::new();
/// query.set_filter_text("김");
/// query.set_sort("generation", Some(Dir::Desc));
/// query.set_page(2).unwrap();
/// query.toggle(17, true);
///
/// assert_eq!(query.current_page(), 2);
/// assert!(query.is_selected(17));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryState {
    filter_text: String,
    sort_keys: Vec<SortKey>,
    column_filters: Vec<ColumnFilter>,
    current_page: usize,
    selected: Selection,
}

impl Default for QueryState {
    fn default() -> Self {
        QueryState {
            filter_text: String::new(),
            sort_keys: Vec::new(),
            column_filters: Vec::new(),
            current_page: 1,
            selected: Selection::new(),
        }
    }
}

impl QueryState {
    /// Fresh state: no search, no sort, no filters, page 1, nothing selected.
    pub fn new() -> Self {
        QueryState::default()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The free-text search.
    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    /// Sort keys in priority order.
    pub fn sort_keys(&self) -> &[SortKey] {
        &self.sort_keys
    }

    /// Direction of the key on `field`, if that column is sorted.
    pub fn sort_dir(&self, field: &str) -> Option<Dir> {
        self.sort_keys
            .iter()
            .find(|key| key.field == field)
            .map(|key| key.dir)
    }

    /// Installed column filters.
    pub fn column_filters(&self) -> &[ColumnFilter] {
        &self.column_filters
    }

    /// The requested page (1-based). May be stale; see [`QueryState::sync_page`].
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// The selected record ids.
    pub fn selected(&self) -> &Selection {
        &self.selected
    }

    /// Returns `true` if `id` is selected.
    pub fn is_selected(&self, id: RecordId) -> bool {
        self.selected.contains(&id)
    }

    // ========================================================================
    // Search and filters
    // ========================================================================

    /// Replaces the search text and returns to the first page.
    ///
    /// The selection is kept as is.
    pub fn set_filter_text(&mut self, text: impl Into<String>) {
        self.filter_text = text.into();
        self.current_page = 1;
    }

    /// Installs a column filter, replacing any filter on the same column,
    /// and returns to the first page.
    pub fn set_column_filter(&mut self, filter: ColumnFilter) {
        match self
            .column_filters
            .iter_mut()
            .find(|f| f.field() == filter.field())
        {
            Some(existing) => *existing = filter,
            None => self.column_filters.push(filter),
        }
        self.current_page = 1;
    }

    /// Removes the filter on `field` ("show all"). Returns `true` if one
    /// was installed.
    pub fn clear_column_filter(&mut self, field: &str) -> bool {
        let before = self.column_filters.len();
        self.column_filters.retain(|f| f.field() != field);
        let removed = self.column_filters.len() != before;
        if removed {
            self.current_page = 1;
        }
        removed
    }

    // ========================================================================
    // Sorting
    // ========================================================================

    /// Replaces the whole sort chain.
    pub fn set_sort_keys(&mut self, keys: Vec<SortKey>) {
        self.sort_keys = keys;
    }

    /// Appends a key at the lowest priority, dropping any earlier key on
    /// the same field.
    pub fn push_sort_key(&mut self, key: SortKey) {
        self.sort_keys.retain(|k| k.field != key.field);
        self.sort_keys.push(key);
    }

    /// Sets, changes or removes the sort on one column.
    ///
    /// A column that is already sorted keeps its priority when only its
    /// direction changes; a newly sorted column goes to the end of the
    /// chain; `None` removes it.
    pub fn set_sort(&mut self, field: &str, dir: Option<Dir>) {
        match dir {
            Some(dir) => match self.sort_keys.iter_mut().find(|k| k.field == field) {
                Some(existing) => existing.dir = dir,
                None => self.sort_keys.push(SortKey::new(field, dir)),
            },
            None => self.sort_keys.retain(|k| k.field != field),
        }
    }

    /// Removes every sort key, restoring input order.
    pub fn clear_sort(&mut self) {
        self.sort_keys.clear();
    }

    // ========================================================================
    // Paging
    // ========================================================================

    /// Requests a page by number.
    ///
    /// Negative numbers are rejected. Zero and numbers past the end are
    /// accepted here and clamped when the view is computed.
    pub fn set_page(&mut self, page: i64) -> Result<()> {
        if page < 0 {
            return Err(ListViewError::invalid(
                "current_page",
                format!("must not be negative, got {page}"),
            ));
        }
        self.current_page = usize::try_from(page).map_err(|_| {
            ListViewError::invalid("current_page", format!("{page} does not fit in usize"))
        })?;
        Ok(())
    }

    /// Goes to page 1.
    pub fn first_page(&mut self) {
        self.current_page = 1;
    }

    /// Goes back one page, stopping at page 1.
    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }

    /// Goes forward one page, stopping at the last page.
    pub fn next_page(&mut self, total_pages: usize) {
        let last = total_pages.max(1);
        self.current_page = (self.current_page + 1).clamp(1, last);
    }

    /// Goes to the last page.
    pub fn last_page(&mut self, total_pages: usize) {
        self.current_page = total_pages.max(1);
    }

    /// Adopts the clamped page of a computed view, so a page number made
    /// stale by a shrinking result set is corrected.
    pub fn sync_page<T>(&mut self, view: &ViewResult<T>) {
        self.current_page = view.effective_page;
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Checks or unchecks one record.
    pub fn toggle(&mut self, id: RecordId, selected: bool) {
        self.selected = selection::toggle_selection(&self.selected, id, selected);
    }

    /// Checks or unchecks every record on a page.
    pub fn select_page(&mut self, page_ids: &[RecordId], select: bool) {
        self.selected = selection::select_all_on_page(&self.selected, page_ids, select);
    }

    /// Returns `true` if every id on a non-empty page is selected.
    pub fn is_page_selected(&self, page_ids: &[RecordId]) -> bool {
        selection::is_page_fully_selected(&self.selected, page_ids)
    }

    /// Unchecks everything.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }
}
