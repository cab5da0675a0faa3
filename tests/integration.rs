//! Integration tests for the achievements table.

use achievement_ledger::{
    AchievementInput, AchievementsTable, Category, Draft, EditField, EventFilter, LedgerEvent,
    MemoryStore, MemoryStoreConfig, QueryHandle, QueryState, RecordStore, RowsPerPage, Seed,
    Status, TechTag,
};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::sync::Arc;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn input(title: &str, category: Category) -> AchievementInput {
    AchievementInput::new(
        title,
        "Shipped something worth writing down",
        category,
        Status::Completed,
        date(2024, 5, 1),
        "Helped the whole team move faster",
    )
}

fn empty_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new(
        MemoryStoreConfig::instant().with_seed(Seed::Empty),
    ))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn table_at(store: Arc<MemoryStore>, url: &str) -> AchievementsTable {
    AchievementsTable::new(store, QueryHandle::parse(url).unwrap())
}

// --- Store Contract ---

#[tokio::test]
async fn test_created_records_listed_with_unique_ids() {
    let store = empty_store();

    let mut created = Vec::new();
    for i in 0..5 {
        let fields = input(&format!("Achievement {i}"), Category::Project)
            .with_tech_stack(vec![TechTag::Flutter]);
        let record = store.create(fields.clone()).await.unwrap();
        assert_eq!(record.to_input(), fields);
        created.push(record);
    }

    let ids: HashSet<_> = created.iter().map(|a| a.id.clone()).collect();
    assert_eq!(ids.len(), 5);

    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), 5);
    // Newest first.
    assert_eq!(listed[0].title, "Achievement 4");
    for record in &created {
        let matching: Vec<_> = listed.iter().filter(|a| a.id == record.id).collect();
        assert_eq!(matching, vec![record]);
    }
}

#[tokio::test]
async fn test_delete_absent_leaves_store_unchanged() {
    let store = MemoryStore::instant();
    store.delete(&"no-such-record".into()).await.unwrap();
    assert_eq!(store.list().await.unwrap().len(), 12);
}

#[tokio::test]
async fn test_list_is_idempotent() {
    let store = MemoryStore::instant();
    let first = store.list().await.unwrap();
    let second = store.list().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_update_then_list() {
    let store = MemoryStore::instant();
    let mut record = store.list().await.unwrap().remove(5);
    record.tech_stack = vec![TechTag::Flutter, TechTag::Sentry];

    store.update(record.clone()).await.unwrap();
    let listed = store.list().await.unwrap();
    assert_eq!(listed[5], record);
}

// --- Table Workflow ---

#[tokio::test]
async fn test_category_filter_via_url() {
    init_tracing();
    let store = empty_store();
    store.create(input("Community talk", Category::Community)).await.unwrap();
    store.create(input("Rust rewrite", Category::Technical)).await.unwrap();
    store.create(input("Side project", Category::Project)).await.unwrap();

    let mut table = table_at(store, "https://example.com/achievements?category=technical");
    table.load().await.unwrap();

    let view = table.view();
    assert_eq!(view.total, 1);
    assert_eq!(view.items[0].title, "Rust rewrite");
}

#[tokio::test]
async fn test_second_page_of_seed() {
    let mut table = table_at(
        Arc::new(MemoryStore::instant()),
        "https://example.com/achievements?page=1&rowsPerPage=10",
    );
    table.load().await.unwrap();

    let view = table.view();
    assert_eq!(view.total, 12);
    assert_eq!(view.items.len(), 2);
    assert_eq!(view.range_label(), "11–12 of 12");
}

#[tokio::test]
async fn test_create_edit_delete_lifecycle() {
    init_tracing();
    let mut table = table_at(Arc::new(MemoryStore::instant()), "https://example.com/a");
    table.load().await.unwrap();
    let events = table.events().subscribe(EventFilter::records());

    let created = table
        .create(input("Conference keynote", Category::Community))
        .await
        .unwrap();
    assert_eq!(table.state().items[0].id, created.id);

    table.start_edit(&created.id, EditField::Status).unwrap();
    table.set_draft(Draft::Status(Status::Planned)).unwrap();
    let saved = table.save_edit().await.unwrap();
    assert_eq!(saved.status, Status::Planned);
    assert!(table.editor().is_idle());

    table.request_delete(&created.id).unwrap();
    table.confirm_delete().await.unwrap();
    assert_eq!(table.state().items.len(), 12);

    assert_eq!(
        events.drain(),
        vec![
            LedgerEvent::Created { id: created.id.clone() },
            LedgerEvent::Updated {
                id: created.id.clone(),
                field: Some(EditField::Status),
            },
            LedgerEvent::Deleted { id: created.id },
        ]
    );
}

#[tokio::test]
async fn test_view_follows_query_changes() {
    let mut table = table_at(Arc::new(MemoryStore::instant()), "https://example.com/a");
    table.load().await.unwrap();
    let query = table.query().clone();

    query.set_status(Some(Status::InProgress));
    let in_progress = table.view().total;
    assert!(in_progress > 0 && in_progress < 12);

    table.set_rows_per_page(RowsPerPage::Five);
    table.set_page(1);
    assert_eq!(table.query().read().page, 1);

    query.clear();
    assert_eq!(table.query().read(), QueryState::default());
    assert_eq!(table.view().total, 12);
}
