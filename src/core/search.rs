use crate::core::filters::{
    matches_intern_filters, matches_intern_query, matches_posting_filters, matches_posting_query,
    InternFilters, PostingFilters,
};
use crate::models::{InternProfile, Posting};
use std::collections::HashSet;

/// Lowercased query, or None when it is blank
fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

/// Keep the first occurrence of every id, preserving order
fn dedup_by_id<T, F>(items: impl IntoIterator<Item = T>, id: F) -> Vec<T>
where
    F: Fn(&T) -> i64,
{
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(id(item))).collect()
}

/// Filter postings by text query and filters
///
/// Only active and published postings are considered. The result keeps the
/// store's order and never repeats a posting.
pub fn search_postings(
    candidates: impl IntoIterator<Item = Posting>,
    query: &str,
    filters: &PostingFilters,
) -> Vec<Posting> {
    let query = normalize_query(query);

    let matching = candidates
        .into_iter()
        .filter(Posting::is_listed)
        .filter(|posting| {
            query
                .as_deref()
                .map_or(true, |q| matches_posting_query(posting, q))
        })
        .filter(|posting| matches_posting_filters(posting, filters));

    dedup_by_id(matching, |posting| posting.id)
}

/// Filter intern profiles by text query and filters
///
/// Only interns with a confirmed email are considered.
pub fn search_interns(
    candidates: impl IntoIterator<Item = InternProfile>,
    query: &str,
    filters: &InternFilters,
) -> Vec<InternProfile> {
    let query = normalize_query(query);

    let matching = candidates
        .into_iter()
        .filter(|intern| intern.email_confirmed)
        .filter(|intern| {
            query
                .as_deref()
                .map_or(true, |q| matches_intern_query(intern, q))
        })
        .filter(|intern| matches_intern_filters(intern, filters));

    dedup_by_id(matching, |intern| intern.id)
}
