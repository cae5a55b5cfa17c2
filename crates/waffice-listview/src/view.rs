//! View computation: filter, sort, paginate.
//!
//! [`compute_view`] turns a record slice and a [`QueryState`] into the page
//! to render plus the metadata that drives the pagination controls. It
//! never mutates the records or the query.

use serde::{Deserialize, Serialize};

use crate::error::{ListViewError, Result};
use crate::filter::SearchText;
use crate::ordering::compare_by_keys;
use crate::query::QueryState;
use crate::record::{Listable, RecordId};
use crate::value::Value;

/// Rows per page used by the roster screens.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of page buttons shown between the arrow buttons.
pub const DEFAULT_PAGE_WINDOW: usize = 5;

/// Per-screen constants: page size and the fields the search box looks at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListSettings {
    pub page_size: usize,
    pub search_fields: Vec<String>,
}

impl Default for ListSettings {
    fn default() -> Self {
        ListSettings {
            page_size: DEFAULT_PAGE_SIZE,
            search_fields: vec!["name".to_string()],
        }
    }
}

impl ListSettings {
    /// Creates settings, rejecting a zero page size.
    pub fn new<I, S>(page_size: usize, search_fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let settings = ListSettings {
            page_size,
            search_fields: search_fields.into_iter().map(Into::into).collect(),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Checks the page size is positive.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(ListViewError::invalid(
                "page_size",
                "must be positive, got 0",
            ));
        }
        Ok(())
    }
}

/// The render-ready output of applying a query to a record collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewResult<T> {
    /// Records on the effective page, in display order.
    pub page_records: Vec<T>,
    /// Number of records passing the search and column filters.
    pub total_count: usize,
    /// `ceil(total_count / page_size)`, never less than 1.
    pub total_pages: usize,
    /// The requested page clamped into `1..=total_pages`.
    pub effective_page: usize,
}

impl<T> ViewResult<T> {
    /// Returns `true` if the page has no records.
    pub fn is_empty(&self) -> bool {
        self.page_records.is_empty()
    }

    /// Returns `true` if there is a page before this one.
    pub fn has_previous(&self) -> bool {
        self.effective_page > 1
    }

    /// Returns `true` if there is a page after this one.
    pub fn has_next(&self) -> bool {
        self.effective_page < self.total_pages
    }

    /// Page numbers for the numbered pagination buttons.
    ///
    /// At most `width` consecutive pages, keeping the effective page in the
    /// middle where possible and sliding to the first or last `width`
    /// pages near either end.
    pub fn page_window(&self, width: usize) -> Vec<usize> {
        let total = self.total_pages;
        if width == 0 {
            return Vec::new();
        }
        if total <= width {
            return (1..=total).collect();
        }

        let half = width / 2;
        let start = if self.effective_page <= half + 1 {
            1
        } else if self.effective_page + half >= total {
            total - width + 1
        } else {
            self.effective_page - half
        };
        (start..start + width).collect()
    }

    /// Converts the page records, keeping the metadata.
    pub fn map<U, F>(self, f: F) -> ViewResult<U>
    where
        F: FnMut(T) -> U,
    {
        ViewResult {
            page_records: self.page_records.into_iter().map(f).collect(),
            total_count: self.total_count,
            total_pages: self.total_pages,
            effective_page: self.effective_page,
        }
    }
}

impl<T: Listable> ViewResult<T> {
    /// Ids of the records on this page, for the "select all" checkbox.
    pub fn page_ids(&self) -> Vec<RecordId> {
        self.page_records.iter().map(Listable::record_id).collect()
    }
}

/// Computes the visible page.
///
/// 1. Keeps records whose searchable fields contain the search text
///    (case-insensitive) and that pass every column filter.
/// 2. Sorts stably by the sort chain; with no keys the input order stays.
/// 3. Clamps the requested page into `1..=total_pages` and slices it out.
///
/// Fails only when `settings.page_size` is zero.
pub fn compute_view<'r, T, F>(
    records: &'r [T],
    settings: &ListSettings,
    query: &QueryState,
    accessor: F,
) -> Result<ViewResult<&'r T>>
where
    for<'a> F: Fn(&'a T, &str) -> Value<'a>,
{
    settings.validate()?;

    let search = SearchText::new(query.filter_text());
    let mut visible: Vec<&'r T> = records
        .iter()
        .filter(|item| search.matches(*item, &settings.search_fields, &accessor))
        .filter(|item| {
            query
                .column_filters()
                .iter()
                .all(|filter| filter.matches_item(*item, &accessor))
        })
        .collect();

    let keys = query.sort_keys();
    if !keys.is_empty() {
        // sort_by is stable, ties keep input order
        visible.sort_by(|a, b| compare_by_keys(*a, *b, keys, &accessor));
    }

    let total_count = visible.len();
    let total_pages = total_count.div_ceil(settings.page_size).max(1);
    let requested = query.current_page();
    let effective_page = requested.clamp(1, total_pages);
    if effective_page != requested {
        tracing::debug!(
            requested,
            effective_page,
            total_pages,
            "requested page out of range, clamped"
        );
    }

    let start = (effective_page - 1) * settings.page_size;
    let page_records: Vec<&'r T> = visible
        .into_iter()
        .skip(start)
        .take(settings.page_size)
        .collect();

    tracing::trace!(
        total = records.len(),
        total_count,
        total_pages,
        effective_page,
        shown = page_records.len(),
        "computed list view"
    );

    Ok(ViewResult {
        page_records,
        total_count,
        total_pages,
        effective_page,
    })
}

/// A list screen: its fixed settings plus its live query state.
///
/// ```
/// use waffice_listview::{ListSettings, ListView, Listable, RecordId, Value};
///
/// struct Member {
///     id: RecordId,
///     name: String,
/// }
///
/// impl Listable for Member {
///     fn record_id(&self) -> RecordId {
///         self.id
///     }
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "name" => Value::String(&self.name),
///             _ => Value::None,
///         }
///     }
/// }
///
/// let members = vec![
///     Member { id: 1, name: "김철수".into() },
///     Member { id: 2, name: "이영희".into() },
///     Member { id: 3, name: "김민수".into() },
/// ];
///
/// let mut screen = ListView::new(ListSettings::default());
/// screen.query_mut().set_filter_text("김");
/// let view = screen.view(&members).unwrap();
/// assert_eq!(view.page_ids(), vec![1, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListView {
    settings: ListSettings,
    query: QueryState,
}

impl ListView {
    /// Opens a screen with fresh query state.
    pub fn new(settings: ListSettings) -> Self {
        ListView {
            settings,
            query: QueryState::new(),
        }
    }

    /// Opens a screen with an existing query state.
    pub fn with_query(settings: ListSettings, query: QueryState) -> Self {
        ListView { settings, query }
    }

    pub fn settings(&self) -> &ListSettings {
        &self.settings
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut QueryState {
        &mut self.query
    }

    /// Computes the current page of `records`.
    pub fn view<'r, T: Listable>(&self, records: &'r [T]) -> Result<ViewResult<&'r T>> {
        compute_view(records, &self.settings, &self.query, T::accessor)
    }

    /// Computes the current page and adopts its effective page number.
    pub fn refresh<'r, T: Listable>(&mut self, records: &'r [T]) -> Result<ViewResult<&'r T>> {
        let view = self.view(records)?;
        self.query.sync_page(&view);
        Ok(view)
    }

    /// Applies the header checkbox to the page currently shown.
    pub fn select_current_page<T: Listable>(&mut self, records: &[T], select: bool) -> Result<()> {
        let ids = self.view(records)?.page_ids();
        self.query.select_page(&ids, select);
        Ok(())
    }

    /// Selected records in input order, for bulk actions.
    ///
    /// Includes selected records hidden by the current search or filters.
    pub fn selected_records<'r, T: Listable>(&self, records: &'r [T]) -> Vec<&'r T> {
        records
            .iter()
            .filter(|r| self.query.is_selected(r.record_id()))
            .collect()
    }
}

impl<T: Listable + ?Sized> Listable for &T {
    fn record_id(&self) -> RecordId {
        (**self).record_id()
    }

    fn field_value(&self, field: &str) -> Value<'_> {
        (**self).field_value(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::ColumnFilter;
    use crate::ordering::{Dir, SortKey};

    #[derive(Debug, PartialEq)]
    struct Row {
        id: RecordId,
        name: String,
        generation: String,
        role: Option<String>,
    }

    impl Listable for Row {
        fn record_id(&self) -> RecordId {
            self.id
        }

        fn field_value(&self, field: &str) -> Value<'_> {
            match field {
                "name" => Value::String(&self.name),
                "generation" => Value::String(&self.generation),
                "role" => Value::from_opt_str(self.role.as_deref()),
                _ => Value::None,
            }
        }
    }

    fn rows(n: usize) -> Vec<Row> {
        (0..n)
            .map(|i| Row {
                id: i as RecordId + 1,
                name: format!("member {i}"),
                generation: format!("{}.0", 20 + i % 3),
                role: (i % 2 == 0).then(|| "정회원".to_string()),
            })
            .collect()
    }

    fn ids<T: Listable>(view: &ViewResult<T>) -> Vec<RecordId> {
        view.page_ids()
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let settings = ListSettings {
            page_size: 0,
            ..ListSettings::default()
        };
        let err = compute_view(&rows(3), &settings, &QueryState::new(), Row::accessor)
            .unwrap_err();
        assert!(matches!(
            err,
            ListViewError::InvalidArgument {
                what: "page_size",
                ..
            }
        ));
        assert!(ListSettings::new(0, ["name"]).is_err());
        assert!(ListSettings::new(25, ["name", "email"]).is_ok());
    }

    #[test]
    fn empty_collection() {
        let records: Vec<Row> = Vec::new();
        let mut query = QueryState::new();
        query.set_page(5).unwrap();
        let view = compute_view(&records, &ListSettings::default(), &query, Row::accessor)
            .unwrap();
        assert!(view.is_empty());
        assert_eq!(view.total_count, 0);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.effective_page, 1);
    }

    #[test]
    fn page_zero_clamps_to_first() {
        let records = rows(12);
        let mut query = QueryState::new();
        query.set_page(0).unwrap();
        let view = compute_view(&records, &ListSettings::default(), &query, Row::accessor)
            .unwrap();
        assert_eq!(view.effective_page, 1);
        assert_eq!(ids(&view), (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn last_page_is_partial() {
        let records = rows(12);
        let mut query = QueryState::new();
        query.set_page(2).unwrap();
        let view = compute_view(&records, &ListSettings::default(), &query, Row::accessor)
            .unwrap();
        assert_eq!(view.total_pages, 2);
        assert_eq!(ids(&view), vec![11, 12]);
        assert!(view.has_previous());
        assert!(!view.has_next());
    }

    #[test]
    fn column_filter_and_search_combine() {
        let records = rows(10);
        let mut query = QueryState::new();
        query.set_column_filter(ColumnFilter::equals("role", "정회원"));
        query.set_filter_text("MEMBER 1");
        let view = compute_view(&records, &ListSettings::default(), &query, Row::accessor)
            .unwrap();
        // only "member 1" matches, and it has no role
        assert_eq!(view.total_count, 0);

        query.set_filter_text("member");
        let view = compute_view(&records, &ListSettings::default(), &query, Row::accessor)
            .unwrap();
        assert_eq!(ids(&view), vec![1, 3, 5, 7, 9]);
    }

    #[test]
    fn sort_then_page() {
        let records = rows(6);
        let mut query = QueryState::new();
        query.set_sort_keys(vec![SortKey::desc("generation")]);
        let settings = ListSettings::new(4, ["name"]).unwrap();
        let view = compute_view(&records, &settings, &query, Row::accessor).unwrap();
        // generations: 20,21,22,20,21,22 -> 22s first, ties by input order
        assert_eq!(ids(&view), vec![3, 6, 2, 5]);

        query.set_page(2).unwrap();
        let view = compute_view(&records, &settings, &query, Row::accessor).unwrap();
        assert_eq!(ids(&view), vec![1, 4]);
    }

    #[test]
    fn records_are_not_mutated() {
        let records = rows(5);
        let mut query = QueryState::new();
        query.set_sort("name", Some(Dir::Desc));
        let _ = compute_view(&records, &ListSettings::default(), &query, Row::accessor)
            .unwrap();
        assert_eq!(records[0].id, 1);
        assert_eq!(records[4].id, 5);
    }

    fn meta(total_pages: usize, effective_page: usize) -> ViewResult<()> {
        ViewResult {
            page_records: Vec::new(),
            total_count: 0,
            total_pages,
            effective_page,
        }
    }

    #[test]
    fn page_window_small_total() {
        assert_eq!(meta(1, 1).page_window(5), vec![1]);
        assert_eq!(meta(3, 2).page_window(5), vec![1, 2, 3]);
        assert_eq!(meta(5, 5).page_window(5), vec![1, 2, 3, 4, 5]);
        assert!(meta(3, 1).page_window(0).is_empty());
    }

    #[test]
    fn page_window_slides() {
        assert_eq!(meta(10, 1).page_window(5), vec![1, 2, 3, 4, 5]);
        assert_eq!(meta(10, 3).page_window(5), vec![1, 2, 3, 4, 5]);
        assert_eq!(meta(10, 4).page_window(5), vec![2, 3, 4, 5, 6]);
        assert_eq!(meta(10, 8).page_window(5), vec![6, 7, 8, 9, 10]);
        assert_eq!(meta(10, 10).page_window(5), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn list_view_refresh_corrects_stale_page() {
        let records = rows(25);
        let mut screen = ListView::new(ListSettings::default());
        screen.query_mut().set_page(3).unwrap();
        screen.query_mut().set_column_filter(ColumnFilter::equals("role", "정회원"));
        // filter reset the page to 1; force a stale page again
        screen.query_mut().set_page(3).unwrap();

        let view = screen.refresh(&records).unwrap();
        assert_eq!(view.total_count, 13);
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.effective_page, 2);
        assert_eq!(screen.query().current_page(), 2);
    }

    #[test]
    fn list_view_resumes_saved_query() {
        let records = rows(25);
        let mut screen = ListView::new(ListSettings::default());
        screen.query_mut().set_sort("generation", Some(Dir::Desc));
        screen.query_mut().set_page(2).unwrap();
        screen.query_mut().toggle(4, true);
        let before = screen.view(&records).unwrap();

        let saved = serde_json::to_string(screen.query()).unwrap();
        let restored: QueryState = serde_json::from_str(&saved).unwrap();
        let resumed = ListView::with_query(ListSettings::default(), restored);

        assert_eq!(resumed, screen);
        assert_eq!(resumed.view(&records).unwrap(), before);
        assert!(resumed.query().is_selected(4));
    }

    #[test]
    fn list_view_selection_survives_search() {
        let records = rows(25);
        let mut screen = ListView::new(ListSettings::default());
        screen.select_current_page(&records, true).unwrap();
        assert_eq!(screen.query().selected().len(), 10);

        screen.query_mut().set_filter_text("member 2");
        let view = screen.view(&records).unwrap();
        assert!(!view.is_empty());

        let selected = screen.selected_records(&records);
        assert_eq!(selected.len(), 10);
        assert_eq!(selected[0].id, 1);

        screen.select_current_page(&records, false).unwrap();
        let view_ids = screen.view(&records).unwrap().page_ids();
        assert!(view_ids.iter().all(|id| !screen.query().is_selected(*id)));
    }
}
