//! Filtered, paginated projection of the record snapshot.

use crate::query::QueryState;
use crate::types::Achievement;

/// Why a page has nothing to show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyState {
    /// The store holds no records at all.
    NoRecords,
    /// Records exist but none match the filters.
    NoMatches,
}

impl EmptyState {
    pub fn title(self) -> &'static str {
        match self {
            EmptyState::NoRecords => "No achievements yet",
            EmptyState::NoMatches => "No achievements found",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            EmptyState::NoRecords => "Get started by adding your first achievement",
            EmptyState::NoMatches => "Try adjusting your search or filters",
        }
    }
}

/// One page of the derived view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewPage {
    /// Records on this page, in store order.
    pub items: Vec<Achievement>,

    /// Number of records matching the filters, across all pages.
    pub total: usize,

    pub page: usize,

    pub rows_per_page: usize,

    /// Set when no record matches; render this instead of the table.
    pub empty: Option<EmptyState>,
}

impl ViewPage {
    /// Number of pages needed for `total` records (at least one).
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.rows_per_page).max(1)
    }

    /// `"11–12 of 12"`, or `"0–0 of 0"` when empty.
    pub fn range_label(&self) -> String {
        if self.items.is_empty() {
            return format!("0–0 of {}", self.total);
        }
        let start = self.page * self.rows_per_page + 1;
        let end = start + self.items.len() - 1;
        format!("{}–{} of {}", start, end, self.total)
    }
}

/// Whether `record` passes every filter in `query`.
pub fn matches(record: &Achievement, query: &QueryState) -> bool {
    let search = query.search.to_lowercase();
    matches_lowered(record, query, &search)
}

fn matches_lowered(record: &Achievement, query: &QueryState, search: &str) -> bool {
    let matches_search = search.is_empty()
        || record.title.to_lowercase().contains(search)
        || record.description.to_lowercase().contains(search);
    let matches_category = query.category.map_or(true, |c| record.category == c);
    let matches_status = query.status.map_or(true, |s| record.status == s);
    let matches_from = query.date_from.map_or(true, |from| record.date >= from);
    let matches_to = query.date_to.map_or(true, |to| record.date <= to);

    matches_search && matches_category && matches_status && matches_from && matches_to
}

/// Filter `records` by `query` and slice out the requested page.
///
/// A page index past the end yields no items but still reports the true
/// `total`.
pub fn derive_view(records: &[Achievement], query: &QueryState) -> ViewPage {
    let search = query.search.to_lowercase();
    let filtered: Vec<&Achievement> = records
        .iter()
        .filter(|r| matches_lowered(r, query, &search))
        .collect();

    let rows_per_page = query.rows_per_page.get();
    let items = filtered
        .iter()
        .skip(query.offset())
        .take(rows_per_page)
        .map(|r| (*r).clone())
        .collect();

    let empty = if records.is_empty() {
        Some(EmptyState::NoRecords)
    } else if filtered.is_empty() {
        Some(EmptyState::NoMatches)
    } else {
        None
    };

    ViewPage {
        items,
        total: filtered.len(),
        page: query.page,
        rows_per_page,
        empty,
    }
}
