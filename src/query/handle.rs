//! URL-backed query state shared between filters and table.

use super::state::{keys, QueryState, RowsPerPage};
use crate::error::{Result, StoreError};
use crate::types::{Category, Status};
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Shared handle on the current URL.
///
/// Clones share one URL, so a write through any clone is visible to every
/// reader immediately. Writes replace the query in place and never
/// navigate; keys not owned by the query state are preserved.
///
/// Every setter commits at once (live filtering). Changing a filter field
/// returns to the first page, as does changing the page size.
#[derive(Clone, Debug)]
pub struct QueryHandle {
    url: Arc<RwLock<Url>>,
}

impl QueryHandle {
    pub fn new(url: Url) -> Self {
        Self {
            url: Arc::new(RwLock::new(url)),
        }
    }

    /// Parse an absolute URL.
    pub fn parse(url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| StoreError::Config(format!("invalid URL {url:?}: {e}")))?;
        Ok(Self::new(url))
    }

    /// The current URL.
    pub fn url(&self) -> Url {
        self.url.read().clone()
    }

    /// Typed state parsed from the current URL.
    pub fn read(&self) -> QueryState {
        QueryState::from_query(self.url.read().query().unwrap_or(""))
    }

    /// Apply `f` to the current state and commit the result in one write.
    pub fn update(&self, f: impl FnOnce(&mut QueryState)) -> QueryState {
        let mut url = self.url.write();
        let mut state = QueryState::from_query(url.query().unwrap_or(""));
        f(&mut state);
        commit(&mut url, &state);
        debug!(query = url.query().unwrap_or(""), "query state committed");
        state
    }

    /// Replace the whole state.
    pub fn replace(&self, state: QueryState) {
        self.update(|current| *current = state);
    }

    pub fn set_search(&self, search: impl Into<String>) {
        let search = search.into();
        self.update(|s| {
            s.search = search;
            s.page = 0;
        });
    }

    pub fn set_category(&self, category: Option<Category>) {
        self.update(|s| {
            s.category = category;
            s.page = 0;
        });
    }

    /// Set the category from a raw select value; empty or unknown clears it.
    pub fn set_category_str(&self, value: &str) {
        self.set_category(value.parse().ok());
    }

    pub fn set_status(&self, status: Option<Status>) {
        self.update(|s| {
            s.status = status;
            s.page = 0;
        });
    }

    /// Set the status from a raw select value; empty or unknown clears it.
    pub fn set_status_str(&self, value: &str) {
        self.set_status(value.parse().ok());
    }

    pub fn set_date_from(&self, date: Option<NaiveDate>) {
        self.update(|s| {
            s.date_from = date;
            s.page = 0;
        });
    }

    pub fn set_date_to(&self, date: Option<NaiveDate>) {
        self.update(|s| {
            s.date_to = date;
            s.page = 0;
        });
    }

    pub fn set_page(&self, page: usize) {
        self.update(|s| s.page = page);
    }

    /// Change the page size and return to the first page.
    pub fn set_rows_per_page(&self, rows_per_page: RowsPerPage) {
        self.update(|s| {
            s.rows_per_page = rows_per_page;
            s.page = 0;
        });
    }

    /// Reset every field, pagination included, to its default.
    pub fn clear(&self) {
        self.replace(QueryState::default());
    }
}

/// Rewrite the owned keys of `url`'s query from `state`.
fn commit(url: &mut Url, state: &QueryState) {
    let foreign: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !keys::ALL.contains(&&**key))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let owned = state.to_pairs();

    if foreign.is_empty() && owned.is_empty() {
        url.set_query(None);
        return;
    }

    let mut pairs = url.query_pairs_mut();
    pairs.clear();
    for (key, value) in &foreign {
        pairs.append_pair(key, value);
    }
    for (key, value) in &owned {
        pairs.append_pair(key, value);
    }
}
