//! Typed query state and its query-string encoding.

use crate::types::{Category, Status};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fmt;
use tracing::debug;
use url::form_urlencoded;

/// Query-string keys, in canonical order.
pub mod keys {
    pub const SEARCH: &str = "search";
    pub const CATEGORY: &str = "category";
    pub const STATUS: &str = "status";
    pub const DATE_FROM: &str = "dateFrom";
    pub const DATE_TO: &str = "dateTo";
    pub const PAGE: &str = "page";
    pub const ROWS_PER_PAGE: &str = "rowsPerPage";

    /// Every key owned by the query state.
    pub const ALL: &[&str] = &[SEARCH, CATEGORY, STATUS, DATE_FROM, DATE_TO, PAGE, ROWS_PER_PAGE];
}

/// Allowed page sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RowsPerPage {
    Five,
    #[default]
    Ten,
    TwentyFive,
}

impl RowsPerPage {
    pub const ALL: &'static [RowsPerPage] =
        &[RowsPerPage::Five, RowsPerPage::Ten, RowsPerPage::TwentyFive];

    pub fn get(self) -> usize {
        match self {
            RowsPerPage::Five => 5,
            RowsPerPage::Ten => 10,
            RowsPerPage::TwentyFive => 25,
        }
    }

    /// `None` for counts outside {5, 10, 25}.
    pub fn from_count(count: usize) -> Option<Self> {
        match count {
            5 => Some(RowsPerPage::Five),
            10 => Some(RowsPerPage::Ten),
            25 => Some(RowsPerPage::TwentyFive),
            _ => None,
        }
    }
}

impl fmt::Display for RowsPerPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Filter and pagination parameters.
///
/// `Default` is the state of an empty query string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryState {
    /// Case-insensitive substring of title or description; empty matches all.
    pub search: String,
    pub category: Option<Category>,
    pub status: Option<Status>,
    /// Inclusive lower bound on the record date.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the record date.
    pub date_to: Option<NaiveDate>,
    /// Zero-based page index.
    pub page: usize,
    pub rows_per_page: RowsPerPage,
}

/// Parse a date from the URL: `YYYY-MM-DD`, or an ISO date-time whose
/// calendar date is taken. Anything else is `None`.
pub fn parse_query_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .map(|dt| dt.date())
        .ok()
}

fn parse_page(value: &str) -> usize {
    value.trim().parse::<usize>().unwrap_or(0)
}

fn parse_rows_per_page(value: &str) -> RowsPerPage {
    value
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(RowsPerPage::from_count)
        .unwrap_or_default()
}

impl QueryState {
    /// Parse a query string (with or without the leading `?`).
    ///
    /// The first occurrence of a key wins. Absent or malformed values take
    /// their defaults; unknown keys are ignored.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut state = QueryState::default();
        let mut seen: Vec<String> = Vec::new();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if seen.iter().any(|k| *k == key) {
                continue;
            }
            seen.push(key.to_string());

            match &*key {
                keys::SEARCH => state.search = value.into_owned(),
                keys::CATEGORY => state.category = value.parse().ok(),
                keys::STATUS => state.status = value.parse().ok(),
                keys::DATE_FROM => state.date_from = parse_query_date(&value),
                keys::DATE_TO => state.date_to = parse_query_date(&value),
                keys::PAGE => state.page = parse_page(&value),
                keys::ROWS_PER_PAGE => state.rows_per_page = parse_rows_per_page(&value),
                _ => continue,
            }
        }

        debug!(?state, "parsed query state");
        state
    }

    /// Non-default fields as `(key, value)` pairs, in canonical key order.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.search.is_empty() {
            pairs.push((keys::SEARCH, self.search.clone()));
        }
        if let Some(category) = self.category {
            pairs.push((keys::CATEGORY, category.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push((keys::STATUS, status.to_string()));
        }
        if let Some(date) = self.date_from {
            pairs.push((keys::DATE_FROM, date.format("%Y-%m-%d").to_string()));
        }
        if let Some(date) = self.date_to {
            pairs.push((keys::DATE_TO, date.format("%Y-%m-%d").to_string()));
        }
        if self.page != 0 {
            pairs.push((keys::PAGE, self.page.to_string()));
        }
        if self.rows_per_page != RowsPerPage::default() {
            pairs.push((keys::ROWS_PER_PAGE, self.rows_per_page.to_string()));
        }
        pairs
    }

    /// Encode non-default fields as a query string (without `?`).
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.to_pairs() {
            serializer.append_pair(key, &value);
        }
        serializer.finish()
    }

    /// Whether any filter (not pagination) field is set.
    pub fn has_filters(&self) -> bool {
        !self.search.is_empty()
            || self.category.is_some()
            || self.status.is_some()
            || self.date_from.is_some()
            || self.date_to.is_some()
    }

    /// First record index of the current page.
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.rows_per_page.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_query_is_default() {
        assert_eq!(QueryState::from_query(""), QueryState::default());
        assert_eq!(QueryState::from_query("?"), QueryState::default());
        assert_eq!(QueryState::default().rows_per_page.get(), 10);
    }

    #[test]
    fn test_parses_all_keys() {
        let state = QueryState::from_query(
            "?search=flutter+app&category=project&status=in-progress\
             &dateFrom=2023-01-01&dateTo=2024-06-30&page=2&rowsPerPage=25",
        );
        assert_eq!(state.search, "flutter app");
        assert_eq!(state.category, Some(Category::Project));
        assert_eq!(state.status, Some(Status::InProgress));
        assert_eq!(state.date_from, Some(date(2023, 1, 1)));
        assert_eq!(state.date_to, Some(date(2024, 6, 30)));
        assert_eq!(state.page, 2);
        assert_eq!(state.rows_per_page, RowsPerPage::TwentyFive);
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let state = QueryState::from_query(
            "category=robots&status=&dateFrom=yesterday&dateTo=2024-02-30&page=-3&rowsPerPage=7",
        );
        assert_eq!(state, QueryState::default());

        let state = QueryState::from_query("page=1.5&rowsPerPage=NaN");
        assert_eq!(state.page, 0);
        assert_eq!(state.rows_per_page, RowsPerPage::Ten);

        let state = QueryState::from_query("page=99999999999999999999999");
        assert_eq!(state.page, 0);
    }

    #[test]
    fn test_iso_datetime_dates() {
        assert_eq!(parse_query_date("2024-03-15T00:00:00.000Z"), Some(date(2024, 3, 15)));
        assert_eq!(parse_query_date("2024-03-15T10:30:00+07:00"), Some(date(2024, 3, 15)));
        assert_eq!(parse_query_date("2024-03-15T10:30"), Some(date(2024, 3, 15)));
        assert_eq!(parse_query_date("15/03/2024"), None);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let state = QueryState::from_query("page=1&page=4&search=a&search=b");
        assert_eq!(state.page, 1);
        assert_eq!(state.search, "a");
    }

    #[test]
    fn test_to_query_omits_defaults() {
        assert_eq!(QueryState::default().to_query(), "");

        let state = QueryState {
            search: "c# & co".into(),
            status: Some(Status::Completed),
            date_to: Some(date(2024, 1, 31)),
            page: 3,
            rows_per_page: RowsPerPage::Five,
            ..Default::default()
        };
        assert_eq!(
            state.to_query(),
            "search=c%23+%26+co&status=completed&dateTo=2024-01-31&page=3&rowsPerPage=5"
        );
        assert_eq!(QueryState::from_query(&state.to_query()), state);
    }

    #[test]
    fn test_offset() {
        let state = QueryState {
            page: 2,
            rows_per_page: RowsPerPage::TwentyFive,
            ..Default::default()
        };
        assert_eq!(state.offset(), 50);
        assert!(!state.has_filters());
    }
}
