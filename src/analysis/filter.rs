//! Client list filtering and sorting.
//!
//! Matching is accent- and case-insensitive: both sides are decomposed
//! (NFD), stripped of combining diacritical marks and lower-cased before a
//! plain substring test.

use crate::models::{Person, SortDirection, StatusFilter};
use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;

/// Range of combining diacritical marks removed during normalization.
const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036f}';

/// Normalize text for comparison.
pub fn normalize_text(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !COMBINING_MARKS.contains(c))
        .collect::<String>()
        .to_lowercase()
}

/// Whether a person matches an already-normalized search term.
fn matches_search(person: &Person, normalized_term: &str) -> bool {
    normalized_term.is_empty()
        || normalize_text(&person.full_name).contains(normalized_term)
        || normalize_text(&person.identification).contains(normalized_term)
}

/// Compare two records by numeric id in the given direction.
fn compare_ids(a: &Person, b: &Person, direction: SortDirection) -> Ordering {
    let a_id = a.id.sort_key();
    let b_id = b.id.sort_key();

    let ordering = a_id.partial_cmp(&b_id).unwrap_or(Ordering::Equal);
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Return the records passing both the search and the status predicate,
/// ordered by id. The input is left untouched.
pub fn filter_and_sort(
    persons: &[Person],
    search_term: &str,
    status_filter: StatusFilter,
    sort_direction: SortDirection,
) -> Vec<Person> {
    let normalized_term = normalize_text(search_term);

    let mut filtered: Vec<Person> = persons
        .iter()
        .filter(|p| matches_search(p, &normalized_term) && status_filter.accepts(p.active))
        .cloned()
        .collect();

    // `sort_by` is stable, so equal ids keep their input order.
    filtered.sort_by(|a, b| compare_ids(a, b, sort_direction));

    filtered
}
