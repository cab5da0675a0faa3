//! Inline editing against a live store.

use achievement_ledger::{
    Category, Draft, EditError, EditField, EditState, MemoryStore, RecordStore, RowEditor,
    TechTag, ValidationKind,
};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_save_through_slow_store() {
    let store = MemoryStore::default();
    let records = store.list().await.unwrap();
    let target = records[4].clone();

    let mut editor = RowEditor::new();
    editor.start(&target, EditField::Category).unwrap();
    editor.set_draft(Draft::Category(Category::Education)).unwrap();

    let started = tokio::time::Instant::now();
    let saved = editor.save(&store, &records).await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(300));

    assert_eq!(saved.category, Category::Education);
    assert!(editor.is_idle());
    assert_eq!(store.list().await.unwrap()[4], saved);
}

#[tokio::test]
async fn test_only_edited_field_changes_in_store() {
    let store = MemoryStore::instant();
    let records = store.list().await.unwrap();
    let target = records[0].clone();

    let mut editor = RowEditor::new();
    editor.start(&target, EditField::Impact).unwrap();
    editor
        .set_draft(Draft::Text("Adopted by three product teams".into()))
        .unwrap();
    editor.save(&store, &records).await.unwrap();

    let stored = store.list().await.unwrap().remove(0);
    assert_eq!(stored.impact, "Adopted by three product teams");
    assert_eq!(stored.title, target.title);
    assert_eq!(stored.description, target.description);
    assert_eq!(stored.date, target.date);
    assert_eq!(stored.tech_stack, target.tech_stack);
}

#[tokio::test]
async fn test_duplicate_tech_tags_rejected() {
    let store = MemoryStore::instant();
    let records = store.list().await.unwrap();

    let mut editor = RowEditor::new();
    editor.start(&records[0], EditField::TechStack).unwrap();
    editor
        .set_draft(Draft::TechStack(vec![TechTag::Flutter, TechTag::Firebase, TechTag::Flutter]))
        .unwrap();

    match editor.save(&store, &records).await {
        Err(EditError::Validation(e)) => {
            assert_eq!(e.kind, ValidationKind::DuplicateTag(TechTag::Flutter));
        }
        other => panic!("expected duplicate tag error, got {other:?}"),
    }
    assert_eq!(store.list().await.unwrap(), records);
}

#[tokio::test]
async fn test_invalid_date_text_rejected() {
    let store = MemoryStore::instant();
    let records = store.list().await.unwrap();

    let mut editor = RowEditor::new();
    editor.start(&records[2], EditField::Date).unwrap();
    editor.set_draft(Draft::Text("2024-13-01".into())).unwrap();

    let err = editor.save(&store, &records).await.unwrap_err();
    assert!(matches!(err, EditError::Validation(ref e) if e.kind == ValidationKind::InvalidDate));
    let EditState::Editing(edit) = editor.state() else {
        panic!("expected Editing");
    };
    assert_eq!(edit.message.as_deref(), Some("Invalid date format"));
}

#[tokio::test]
async fn test_save_when_idle() {
    let store = MemoryStore::instant();
    let records = store.list().await.unwrap();

    let mut editor = RowEditor::new();
    assert!(matches!(
        editor.save(&store, &records).await,
        Err(EditError::NotEditing)
    ));
}
