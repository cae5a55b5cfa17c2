//! Waffice ListView - search, sort, paginate and select over roster tables.
//!
//! Every list screen of the dashboard (members, membership applications)
//! shows the same pipeline over an in-memory snapshot of records:
//!
//! - Free-text search over designated fields, case-insensitive
//! - Column filters from the table header dropdowns
//! - Stable multi-key sorting, first key primary and later keys breaking ties
//! - Fixed-size pages with the requested page clamped into range
//! - Checkbox selection that is additive across pages
//!
//! The engine is generic over record shape. Callers either implement
//! [`Listable`] or pass an accessor function returning a [`Value`] for a
//! field name.
//!
//! # Quick Start
//!
//! ```rust
//! use waffice_listview::{compute_view, Dir, ListSettings, QueryState, Value};
//!
//! struct Application {
//!     id: i64,
//!     name: String,
//!     generation: String,
//! }
//!
//! fn accessor<'a>(app: &'a Application, field: &str) -> Value<'a> {
//!     match field {
//!         "name" => Value::String(&app.name),
//!         "generation" => Value::String(&app.generation),
//!         _ => Value::None,
//!     }
//! }
//!
//! let apps = vec![
//!     Application { id: 1, name: "김철수".into(), generation: "23.0".into() },
//!     Application { id: 2, name: "이영희".into(), generation: "23.5".into() },
//!     Application { id: 3, name: "김민수".into(), generation: "23.5".into() },
//! ];
//!
//! let mut query = QueryState::new();
//! query.set_filter_text("김");
//! query.set_sort("generation", Some(Dir::Desc));
//!
//! let view = compute_view(&apps, &ListSettings::default(), &query, accessor).unwrap();
//! assert_eq!(view.total_count, 2);
//! assert_eq!(view.page_records[0].id, 3);
//! assert_eq!(view.effective_page, 1);
//! ```
//!
//! # Selection
//!
//! Selection is a set of record ids kept in [`QueryState`]. Changing the
//! search, sort or filters does not clear it, so a record can stay
//! selected while it is hidden. [`ListView::selected_records`] returns all
//! of them for bulk actions.
//!
//! # Errors
//!
//! The only error is [`ListViewError::InvalidArgument`], for a zero page
//! size or an explicitly negative page number.

mod error;
mod filter;
mod ordering;
mod query;
mod record;
mod selection;
mod value;
mod view;

// Re-export public API
pub use error::{ListViewError, Result};
pub use filter::{ColumnFilter, SearchText};
pub use ordering::{compare_by_keys, compare_strings, compare_values, Dir, SortKey};
pub use query::QueryState;
pub use record::{Listable, RecordId};
pub use selection::{is_page_fully_selected, select_all_on_page, toggle_selection, Selection};
pub use value::{Number, Timestamp, Value};
pub use view::{
    compute_view, ListSettings, ListView, ViewResult, DEFAULT_PAGE_SIZE, DEFAULT_PAGE_WINDOW,
};
