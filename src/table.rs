//! The achievements table: snapshot, filters, inline editing and deletion
//! wired to one record store.

use crate::editor::{Draft, EditError, EditField, RowEditor};
use crate::error::{Result, StoreError};
use crate::events::{EventBus, LedgerEvent};
use crate::query::{QueryHandle, RowsPerPage};
use crate::records::RecordStore;
use crate::types::{Achievement, AchievementId, AchievementInput};
use crate::validation::validate_input;
use crate::view::{derive_view, ViewPage};
use std::sync::Arc;
use tracing::{debug, info, warn};

const FETCH_FAILED: &str = "Failed to fetch achievements";
const CREATE_FAILED: &str = "Failed to create achievement";
const UPDATE_FAILED: &str = "Failed to update achievement";
const DELETE_FAILED: &str = "Failed to delete achievement";

type EditResult<T> = std::result::Result<T, EditError>;

/// Loaded records plus request status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AchievementsState {
    pub items: Vec<Achievement>,
    pub loading: bool,
    /// Message of the last failed store operation.
    pub error: Option<String>,
}

/// A deletion awaiting the user's confirmation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pub id: AchievementId,
    pub title: String,
}

impl DeleteConfirmation {
    pub fn prompt(&self) -> String {
        format!(
            "Are you sure you want to delete the achievement \"{}\"? This action cannot be undone.",
            self.title
        )
    }
}

pub struct AchievementsTable {
    store: Arc<dyn RecordStore>,
    query: QueryHandle,
    editor: RowEditor,
    state: AchievementsState,
    events: EventBus,
    pending_delete: Option<DeleteConfirmation>,
    selected: Option<AchievementId>,
}

impl AchievementsTable {
    pub fn new(store: Arc<dyn RecordStore>, query: QueryHandle) -> Self {
        Self::with_events(store, query, EventBus::new())
    }

    pub fn with_events(
        store: Arc<dyn RecordStore>,
        query: QueryHandle,
        events: EventBus,
    ) -> Self {
        Self {
            store,
            query,
            editor: RowEditor::new(),
            state: AchievementsState::default(),
            events,
            pending_delete: None,
            selected: None,
        }
    }

    pub fn state(&self) -> &AchievementsState {
        &self.state
    }

    pub fn query(&self) -> &QueryHandle {
        &self.query
    }

    pub fn editor(&self) -> &RowEditor {
        &self.editor
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Replace the snapshot with the store's contents.
    pub async fn load(&mut self) -> Result<()> {
        self.state.loading = true;
        self.state.error = None;

        match self.store.list().await {
            Ok(items) => {
                let count = items.len();
                self.state.items = items;
                self.state.loading = false;
                info!(count, "achievements loaded");
                self.events.publish(LedgerEvent::Loaded { count });
                Ok(())
            }
            Err(e) => {
                self.state.loading = false;
                self.fail(FETCH_FAILED, &e);
                Err(e)
            }
        }
    }

    /// The current page under the URL's filters.
    pub fn view(&self) -> ViewPage {
        derive_view(&self.state.items, &self.query.read())
    }

    pub async fn create(&mut self, input: AchievementInput) -> Result<Achievement> {
        if let Err(e) = validate_input(&input) {
            self.events.error(e.to_string());
            return Err(e.into());
        }

        match self.store.create(input).await {
            Ok(created) => {
                self.state.items.insert(0, created.clone());
                self.events.publish(LedgerEvent::Created {
                    id: created.id.clone(),
                });
                self.events.success("Achievement created successfully");
                Ok(created)
            }
            Err(e) => {
                self.fail(CREATE_FAILED, &e);
                Err(e)
            }
        }
    }

    // --- Inline editing ---

    pub fn start_edit(&mut self, id: &AchievementId, field: EditField) -> EditResult<()> {
        let record = self
            .state
            .items
            .iter()
            .find(|a| &a.id == id)
            .ok_or_else(|| EditError::RecordMissing(id.clone()))?;
        self.editor.start(record, field)
    }

    pub fn set_draft(&mut self, draft: Draft) -> EditResult<()> {
        self.editor.set_draft(draft)
    }

    pub fn cancel_edit(&mut self) -> EditResult<()> {
        self.editor.cancel()
    }

    /// Validate and persist the active edit.
    ///
    /// The snapshot changes only once the store confirms the update.
    pub async fn save_edit(&mut self) -> EditResult<Achievement> {
        let field = self.editor.active().map(|edit| edit.field);

        match self.editor.save(&*self.store, &self.state.items).await {
            Ok(saved) => {
                self.replace(saved.clone());
                self.events.publish(LedgerEvent::Updated {
                    id: saved.id.clone(),
                    field,
                });
                self.events.success("Achievement updated successfully");
                Ok(saved)
            }
            Err(EditError::Validation(e)) => {
                self.events.error(e.to_string());
                Err(EditError::Validation(e))
            }
            Err(EditError::Store(e)) => {
                self.fail(UPDATE_FAILED, &e);
                Err(EditError::Store(e))
            }
            Err(e) => Err(e),
        }
    }

    // --- Deletion ---

    /// Stage a deletion; nothing is removed until [`confirm_delete`](Self::confirm_delete).
    pub fn request_delete(&mut self, id: &AchievementId) -> Result<DeleteConfirmation> {
        let record = self
            .find(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        let confirmation = DeleteConfirmation {
            id: record.id.clone(),
            title: record.title.clone(),
        };
        self.pending_delete = Some(confirmation.clone());
        Ok(confirmation)
    }

    pub fn pending_delete(&self) -> Option<&DeleteConfirmation> {
        self.pending_delete.as_ref()
    }

    pub fn cancel_delete(&mut self) {
        if let Some(pending) = self.pending_delete.take() {
            debug!(id = %pending.id, "delete cancelled");
        }
    }

    /// Delete the staged record. A no-op when nothing is staged.
    pub async fn confirm_delete(&mut self) -> Result<()> {
        let Some(pending) = self.pending_delete.take() else {
            return Ok(());
        };

        match self.store.delete(&pending.id).await {
            Ok(()) => {
                self.state.items.retain(|a| a.id != pending.id);
                if self.selected.as_ref() == Some(&pending.id) {
                    self.selected = None;
                }
                if self.editor.active().is_some_and(|edit| edit.id == pending.id) {
                    if let Err(e) = self.editor.cancel() {
                        debug!(id = %pending.id, error = %e, "edit on deleted row left open");
                    }
                }
                self.events.publish(LedgerEvent::Deleted {
                    id: pending.id.clone(),
                });
                self.events
                    .success(format!("Achievement \"{}\" deleted successfully", pending.title));
                Ok(())
            }
            Err(e) => {
                self.fail(DELETE_FAILED, &e);
                Err(e)
            }
        }
    }

    // --- Detail view ---

    /// Open a record's details. Ignored while an inline edit is active.
    pub fn select(&mut self, id: &AchievementId) -> bool {
        if !self.editor.is_idle() || self.find(id).is_none() {
            return false;
        }
        self.selected = Some(id.clone());
        true
    }

    pub fn selected(&self) -> Option<&Achievement> {
        self.selected.as_ref().and_then(|id| self.find(id))
    }

    pub fn close_details(&mut self) {
        self.selected = None;
    }

    /// Persist a whole-record edit from the detail view.
    pub async fn save_details(&mut self, record: Achievement) -> Result<Achievement> {
        if let Err(e) = validate_input(&record.to_input()) {
            self.events.error(e.to_string());
            return Err(e.into());
        }

        match self.store.update(record).await {
            Ok(saved) => {
                self.replace(saved.clone());
                self.events.publish(LedgerEvent::Updated {
                    id: saved.id.clone(),
                    field: None,
                });
                self.events.success("Achievement updated successfully");
                Ok(saved)
            }
            Err(e) => {
                self.fail(UPDATE_FAILED, &e);
                Err(e)
            }
        }
    }

    // --- Pagination ---

    pub fn set_page(&self, page: usize) {
        self.query.set_page(page);
    }

    pub fn set_rows_per_page(&self, rows_per_page: RowsPerPage) {
        self.query.set_rows_per_page(rows_per_page);
    }

    pub fn clear_error(&mut self) {
        self.state.error = None;
    }

    fn find(&self, id: &AchievementId) -> Option<&Achievement> {
        self.state.items.iter().find(|a| &a.id == id)
    }

    fn replace(&mut self, record: Achievement) {
        if let Some(slot) = self.state.items.iter_mut().find(|a| a.id == record.id) {
            *slot = record;
        }
    }

    fn fail(&mut self, message: &str, cause: &StoreError) {
        warn!(error = %cause, "{message}");
        self.state.error = Some(message.to_string());
        self.events.error(message);
    }
}

impl std::fmt::Debug for AchievementsTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AchievementsTable")
            .field("items", &self.state.items.len())
            .field("loading", &self.state.loading)
            .field("editor", self.editor.state())
            .finish()
    }
}
