//! URL synchronization of filter and pagination state.

use achievement_ledger::query::keys;
use achievement_ledger::{Category, QueryHandle, QueryState, RowsPerPage, Status};
use chrono::NaiveDate;

fn handle(url: &str) -> QueryHandle {
    QueryHandle::parse(url).unwrap()
}

#[test]
fn test_rows_per_page_change_resets_page() {
    let query = handle("https://example.com/achievements?page=2");
    assert_eq!(query.read().page, 2);

    query.set_rows_per_page(RowsPerPage::TwentyFive);
    let state = query.read();
    assert_eq!(state.page, 0);
    assert_eq!(state.rows_per_page, RowsPerPage::TwentyFive);
    assert_eq!(query.url().query(), Some("rowsPerPage=25"));
}

#[test]
fn test_page_change_keeps_filters() {
    let query = handle("https://example.com/a?search=flutter&status=completed");
    query.set_page(3);

    let state = query.read();
    assert_eq!(state.search, "flutter");
    assert_eq!(state.status, Some(Status::Completed));
    assert_eq!(state.page, 3);
}

#[test]
fn test_every_filter_resets_page() {
    let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let setters: Vec<Box<dyn Fn(&QueryHandle)>> = vec![
        Box::new(|q| q.set_search("sdk")),
        Box::new(|q| q.set_category(Some(Category::Education))),
        Box::new(|q| q.set_status(Some(Status::Planned))),
        Box::new(move |q| q.set_date_from(Some(day))),
        Box::new(move |q| q.set_date_to(Some(day))),
    ];

    for set in setters {
        let query = handle("https://example.com/a?page=4");
        set(&query);
        assert_eq!(query.read().page, 0);
    }
}

#[test]
fn test_clear_resets_everything() {
    let query = handle(
        "https://example.com/a?search=x&category=project&dateFrom=2024-01-01&page=2&rowsPerPage=5",
    );
    query.clear();
    assert_eq!(query.read(), QueryState::default());
    assert_eq!(query.url().as_str(), "https://example.com/a");
}

#[test]
fn test_external_url_changes_visible_on_read() {
    let query = handle("https://example.com/a");
    let mut state = query.read();
    state.category = Some(Category::Community);
    state.rows_per_page = RowsPerPage::Five;

    query.replace(state.clone());
    assert_eq!(query.read(), state);
    assert_eq!(query.url().query(), Some("category=community&rowsPerPage=5"));
}

#[test]
fn test_malformed_url_values_default() {
    let query = handle("https://example.com/a?category=Robotics&page=abc&rowsPerPage=100&dateTo=soon");
    assert_eq!(query.read(), QueryState::default());

    // The first write normalizes the owned keys.
    query.set_page(1);
    assert_eq!(query.url().query(), Some("page=1"));
}

#[test]
fn test_owned_keys() {
    assert_eq!(keys::ALL.len(), 7);
    assert!(keys::ALL.contains(&"rowsPerPage"));
}

#[test]
fn test_search_is_url_encoded() {
    let query = handle("https://example.com/a");
    query.set_search("next.js & firebase");
    assert_eq!(query.url().query(), Some("search=next.js+%26+firebase"));
    assert_eq!(query.read().search, "next.js & firebase");
}
