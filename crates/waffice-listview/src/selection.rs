//! Checkbox selection bookkeeping.
//!
//! All functions are pure: they take the current selection and return the
//! next one. Selection is keyed by [`RecordId`] and is not tied to the
//! current filter, so ids stay selected while hidden by a search.

use std::collections::BTreeSet;

use crate::record::RecordId;

/// The set of selected record ids.
pub type Selection = BTreeSet<RecordId>;

/// Marks `id` selected or unselected.
///
/// Idempotent: applying the same `(id, now_selected)` twice gives the same
/// set as applying it once.
pub fn toggle_selection(selected: &Selection, id: RecordId, now_selected: bool) -> Selection {
    let mut next = selected.clone();
    if now_selected {
        next.insert(id);
    } else {
        next.remove(&id);
    }
    next
}

/// Applies the per-page "select all" checkbox.
///
/// Selecting adds the page's ids to whatever is already selected, so
/// choosing "all" on page 2 keeps the picks made on page 1. Unselecting
/// removes only the page's ids.
pub fn select_all_on_page(selected: &Selection, page_ids: &[RecordId], select: bool) -> Selection {
    if select {
        selected.iter().chain(page_ids).copied().collect()
    } else {
        selected
            .iter()
            .copied()
            .filter(|id| !page_ids.contains(id))
            .collect()
    }
}

/// Returns `true` iff the page is non-empty and every id on it is selected.
///
/// Drives the checked state of the header checkbox.
pub fn is_page_fully_selected(selected: &Selection, page_ids: &[RecordId]) -> bool {
    !page_ids.is_empty() && page_ids.iter().all(|id| selected.contains(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[RecordId]) -> Selection {
        ids.iter().copied().collect()
    }

    #[test]
    fn toggle_adds_and_removes() {
        let s = toggle_selection(&Selection::new(), 3, true);
        assert_eq!(s, set(&[3]));
        assert_eq!(toggle_selection(&s, 3, false), Selection::new());
        assert_eq!(toggle_selection(&s, 9, false), s);
    }

    #[test]
    fn toggle_is_idempotent() {
        let base = set(&[1, 2]);
        let once = toggle_selection(&base, 5, true);
        assert_eq!(toggle_selection(&once, 5, true), once);

        let removed = toggle_selection(&base, 1, false);
        assert_eq!(toggle_selection(&removed, 1, false), removed);
    }

    #[test]
    fn select_all_is_additive_across_pages() {
        let page1 = [1, 2, 3];
        let page2 = [11, 12];
        let s = select_all_on_page(&Selection::new(), &page1, true);
        let s = select_all_on_page(&s, &page2, true);
        assert_eq!(s, set(&[1, 2, 3, 11, 12]));
    }

    #[test]
    fn unselect_all_only_touches_page() {
        let s = set(&[1, 2, 3, 11, 12]);
        assert_eq!(select_all_on_page(&s, &[11, 12], false), set(&[1, 2, 3]));
    }

    #[test]
    fn page_fully_selected() {
        let s = set(&[1, 2, 3]);
        assert!(is_page_fully_selected(&s, &[1, 2]));
        assert!(!is_page_fully_selected(&s, &[1, 4]));
        assert!(!is_page_fully_selected(&s, &[]));
    }
}
