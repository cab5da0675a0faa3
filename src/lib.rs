//! # Achievement Ledger
//!
//! Core of a portfolio achievements table: a record store with simulated or
//! real backends, filter and pagination state kept in the URL, a derived
//! page view, inline single-field editing, and a persisted theme preference.
//!
//! ## Core Concepts
//!
//! - **Records**: [`Achievement`]s behind the async [`RecordStore`] trait
//! - **Query**: [`QueryState`] parsed from and written back to the URL
//! - **View**: [`derive_view`] filters and paginates a snapshot
//! - **Editing**: [`RowEditor`] holds at most one `(record, field)` edit
//! - **Theme**: [`ThemeState`] persisted through [`KeyValueStorage`]
//!
//! ## Example
//!
//! ```ignore
//! use achievement_ledger::{AchievementsTable, MemoryStore, QueryHandle};
//! use std::sync::Arc;
//!
//! let query = QueryHandle::parse("https://example.com/achievements?category=technical")?;
//! let mut table = AchievementsTable::new(Arc::new(MemoryStore::default()), query.clone());
//! table.load().await?;
//!
//! query.set_search("flutter");
//! let page = table.view();
//! println!("{}", page.range_label());
//! ```

pub mod editor;
pub mod error;
pub mod events;
pub mod query;
pub mod records;
pub mod seed;
pub mod storage;
pub mod table;
pub mod theme;
pub mod types;
pub mod validation;
pub mod view;

// Re-exports
pub use editor::{
    apply_draft, validate_draft, ActiveEdit, Draft, EditError, EditField, EditState, RowEditor,
};
pub use error::{Result, StoreError};
pub use events::{
    DropReason, EventBus, EventBusConfig, EventFilter, EventHandle, LedgerEvent, Notification,
    NotificationLevel, SubscriptionId,
};
pub use query::{QueryHandle, QueryState, RowsPerPage};
pub use records::{HttpStore, HttpStoreConfig, MemoryStore, MemoryStoreConfig, RecordStore, Seed};
pub use seed::seed_achievements;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use table::{AchievementsState, AchievementsTable, DeleteConfirmation};
pub use theme::{ThemeMode, ThemeState, THEME_KEY};
pub use types::*;
pub use validation::{validate_input, ValidationError, ValidationKind};
pub use view::{derive_view, EmptyState, ViewPage};
