//! Deterministic filter, search, and pagination over in-memory collections.
//!
//! The pipeline is pure: it never mutates the source collection and holds
//! no state between calls; identical inputs produce identical output.

use serde::{Deserialize, Serialize};

/// Number of entities per page when the caller does not say otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// A 1-based page request. Page number 0 is treated as page 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub number: usize,
    pub size: usize,
}

impl PageRequest {
    pub fn new(number: usize, size: usize) -> Self {
        Self { number, size }
    }

    /// The first page at the default size.
    pub fn first() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }

    fn effective_number(&self) -> usize {
        self.number.max(1)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// Role predicate for the user listing.
///
/// Parsed from the literal string `"all"`; any other input is a role name
/// matched by exact, case-sensitive equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleFilter {
    All,
    Named(String),
}

impl RoleFilter {
    pub fn parse(input: &str) -> Self {
        if input == "all" {
            Self::All
        } else {
            Self::Named(input.to_string())
        }
    }

    pub fn matches(&self, role: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == role,
        }
    }
}

impl Default for RoleFilter {
    fn default() -> Self {
        Self::All
    }
}

/// One page of query results plus the counts the pagination widget needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paged<T> {
    /// Entities on the requested page, in collection order.
    pub items: Vec<T>,
    /// Matches across all pages, counted before pagination.
    pub total_matching: usize,
    /// The request that produced this page.
    pub request: PageRequest,
}

impl<T> Paged<T> {
    /// Page count at the requested size; 0 when the size is 0.
    pub fn total_pages(&self) -> usize {
        if self.request.size == 0 {
            0
        } else {
            self.total_matching.div_ceil(self.request.size)
        }
    }

    /// 1-based index of the first slot on this page, for the
    /// "Showing X to Y of Z" caption. A page past the data still reports
    /// its nominal start (saturating at `usize::MAX`), so an empty result
    /// reads "Showing 1 to 0 of 0".
    pub fn first_index(&self) -> usize {
        self.request
            .size
            .saturating_mul(self.request.effective_number() - 1)
            .saturating_add(1)
    }

    /// 1-based index of the last entity on this page, clamped to the match
    /// count.
    pub fn last_index(&self) -> usize {
        self.request
            .size
            .saturating_mul(self.request.effective_number())
            .min(self.total_matching)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Runs the fixed three-stage pipeline: predicate filter, then
/// case-insensitive text search, then pagination.
///
/// `text_of` extracts the searchable text of an entity; an empty
/// `search_term` matches everything. An out-of-range page yields a short
/// or empty final page, never an error, and the page is not re-clamped:
/// reporting a page past the data is the caller's concern.
pub fn run_query<T, P, F>(
    items: &[T],
    predicate: P,
    search_term: &str,
    text_of: F,
    page: PageRequest,
) -> Paged<T>
where
    T: Clone,
    P: Fn(&T) -> bool,
    F: Fn(&T) -> String,
{
    let needle = search_term.to_lowercase();
    let matching: Vec<&T> = items
        .iter()
        .filter(|item| predicate(item))
        .filter(|item| needle.is_empty() || text_of(item).to_lowercase().contains(&needle))
        .collect();

    let total_matching = matching.len();
    let number = page.effective_number();
    // Saturating so an absurd page number or size stays an out-of-range
    // page instead of an arithmetic overflow.
    let start = page.size.saturating_mul(number - 1).min(total_matching);
    let end = page.size.saturating_mul(number).min(total_matching);
    let items = matching[start..end].iter().map(|item| (*item).clone()).collect();

    Paged {
        items,
        total_matching,
        request: page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(count: usize) -> Vec<String> {
        (1..=count).map(|n| format!("entry {:02}", n)).collect()
    }

    fn query_all(items: &[String], page: PageRequest) -> Paged<String> {
        run_query(items, |_| true, "", |s| s.clone(), page)
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let items = vec!["Jane Smith".to_string(), "John Doe".to_string()];
        let page = run_query(&items, |_| true, "JANE", |s| s.clone(), PageRequest::first());
        assert_eq!(page.items, ["Jane Smith"]);
        assert_eq!(page.total_matching, 1);
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let items = names(3);
        let page = query_all(&items, PageRequest::first());
        assert_eq!(page.total_matching, 3);
    }

    #[test]
    fn test_predicate_runs_before_search() {
        let items = vec!["keep one".to_string(), "drop one".to_string()];
        let page = run_query(
            &items,
            |s: &String| s.starts_with("keep"),
            "one",
            |s| s.clone(),
            PageRequest::first(),
        );
        assert_eq!(page.items, ["keep one"]);
    }

    #[test]
    fn test_pagination_slices_by_page_number() {
        let items = names(12);
        let page = query_all(&items, PageRequest::new(2, 5));
        assert_eq!(page.items, ["entry 06", "entry 07", "entry 08", "entry 09", "entry 10"]);
        assert_eq!(page.total_matching, 12);
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn test_final_page_is_short() {
        let items = names(12);
        let page = query_all(&items, PageRequest::new(3, 5));
        assert_eq!(page.items, ["entry 11", "entry 12"]);
    }

    #[test]
    fn test_out_of_range_page_is_empty_not_error() {
        let items = names(4);
        let page = query_all(&items, PageRequest::new(9, 5));
        assert!(page.is_empty());
        assert_eq!(page.total_matching, 4);
    }

    #[test]
    fn test_huge_page_number_is_empty_not_error() {
        let items = names(12);
        let page = query_all(&items, PageRequest::new(usize::MAX, 5));
        assert!(page.is_empty());
        assert_eq!(page.total_matching, 12);

        let huge_size = query_all(&items, PageRequest::new(2, usize::MAX));
        assert!(huge_size.is_empty());
    }

    #[test]
    fn test_showing_range_saturates_on_huge_page_number() {
        let items = names(12);
        let page = query_all(&items, PageRequest::new(usize::MAX, 5));
        assert_eq!(page.first_index(), usize::MAX);
        assert_eq!(page.last_index(), 12);
    }

    #[test]
    fn test_page_zero_is_page_one() {
        let items = names(7);
        let zero = query_all(&items, PageRequest::new(0, 5));
        let one = query_all(&items, PageRequest::new(1, 5));
        assert_eq!(zero.items, one.items);
        assert_eq!(zero.first_index(), 1);
    }

    #[test]
    fn test_showing_range_indices() {
        let items = names(12);
        let page = query_all(&items, PageRequest::new(3, 5));
        assert_eq!(page.first_index(), 11);
        assert_eq!(page.last_index(), 12);

        let empty = query_all(&[], PageRequest::first());
        assert_eq!(empty.first_index(), 1);
        assert_eq!(empty.last_index(), 0);
    }

    #[test]
    fn test_zero_size_yields_no_pages() {
        let items = names(3);
        let page = query_all(&items, PageRequest::new(1, 0));
        assert!(page.is_empty());
        assert_eq!(page.total_pages(), 0);
    }

    #[test]
    fn test_role_filter_parse() {
        assert_eq!(RoleFilter::parse("all"), RoleFilter::All);
        assert_eq!(
            RoleFilter::parse("Admin"),
            RoleFilter::Named("Admin".to_string())
        );
        // Only the exact lowercase literal means "everything".
        assert_eq!(
            RoleFilter::parse("All"),
            RoleFilter::Named("All".to_string())
        );
    }

    #[test]
    fn test_role_filter_matches_case_sensitively() {
        let filter = RoleFilter::Named("Admin".to_string());
        assert!(filter.matches("Admin"));
        assert!(!filter.matches("admin"));
        assert!(RoleFilter::All.matches("anything"));
    }

    #[test]
    fn test_identical_inputs_identical_output() {
        let items = names(9);
        let a = query_all(&items, PageRequest::new(2, 4));
        let b = query_all(&items, PageRequest::new(2, 4));
        assert_eq!(a, b);
    }
}
