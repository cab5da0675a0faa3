//! Inline single-field editing of table rows.
//!
//! A [`RowEditor`] holds at most one active `(record, field)` edit:
//!
//! ```text
//!   Idle --start--> Editing --begin_save(valid)--> Saving --finish_save(Ok)--> Idle
//!                    ^  |                             |
//!                    |  +--cancel--> Idle             |
//!                    +-------finish_save(Err)---------+
//! ```
//!
//! Starting a new edit while one is Editing discards the old draft. Starting
//! or cancelling while Saving is refused until the save resolves.

use crate::error::StoreError;
use crate::records::RecordStore;
use crate::types::{Achievement, AchievementId, Category, Status, TechTag};
use crate::validation::{parse_date, validate_tech_stack, validate_text, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// An editable column of the achievements table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditField {
    Title,
    Description,
    Category,
    Status,
    Date,
    Impact,
    TechStack,
}

impl EditField {
    /// Columns in table order.
    pub const ALL: &'static [EditField] = &[
        EditField::Title,
        EditField::Description,
        EditField::Category,
        EditField::Status,
        EditField::Date,
        EditField::Impact,
        EditField::TechStack,
    ];

    /// Human-readable name used in messages.
    pub fn label(self) -> &'static str {
        match self {
            EditField::Title => "Title",
            EditField::Description => "Description",
            EditField::Category => "Category",
            EditField::Status => "Status",
            EditField::Date => "Date",
            EditField::Impact => "Impact",
            EditField::TechStack => "Tech stack",
        }
    }
}

impl fmt::Display for EditField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Uncommitted value of the field under edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Draft {
    /// Title, description, impact, or the date as typed (`YYYY-MM-DD`).
    Text(String),
    Category(Category),
    Status(Status),
    TechStack(Vec<TechTag>),
}

impl Draft {
    /// The field's current value on a record.
    pub fn for_field(record: &Achievement, field: EditField) -> Self {
        match field {
            EditField::Title => Draft::Text(record.title.clone()),
            EditField::Description => Draft::Text(record.description.clone()),
            EditField::Category => Draft::Category(record.category),
            EditField::Status => Draft::Status(record.status),
            EditField::Date => Draft::Text(record.date.format("%Y-%m-%d").to_string()),
            EditField::Impact => Draft::Text(record.impact.clone()),
            EditField::TechStack => Draft::TechStack(record.tech_stack.clone()),
        }
    }

    /// Whether this kind of draft can be applied to `field`.
    pub fn fits(&self, field: EditField) -> bool {
        matches!(
            (self, field),
            (
                Draft::Text(_),
                EditField::Title | EditField::Description | EditField::Date | EditField::Impact
            ) | (Draft::Category(_), EditField::Category)
                | (Draft::Status(_), EditField::Status)
                | (Draft::TechStack(_), EditField::TechStack)
        )
    }
}

/// Check one field's draft against its constraint.
pub fn validate_draft(field: EditField, draft: &Draft) -> Result<(), EditError> {
    match (field, draft) {
        (EditField::Title | EditField::Description | EditField::Impact, Draft::Text(text)) => {
            validate_text(field, text)?
        }
        (EditField::Date, Draft::Text(text)) => {
            parse_date(text)?;
        }
        (EditField::TechStack, Draft::TechStack(tags)) => validate_tech_stack(tags)?,
        (EditField::Category, Draft::Category(_)) | (EditField::Status, Draft::Status(_)) => {}
        _ => return Err(EditError::DraftMismatch { field }),
    }
    Ok(())
}

/// Validate a draft and produce `record` with the edited field replaced.
///
/// Every other field of the returned record is unchanged.
pub fn apply_draft(
    record: &Achievement,
    field: EditField,
    draft: &Draft,
) -> Result<Achievement, EditError> {
    validate_draft(field, draft)?;

    let mut updated = record.clone();
    match (field, draft) {
        (EditField::Title, Draft::Text(text)) => updated.title = text.clone(),
        (EditField::Description, Draft::Text(text)) => updated.description = text.clone(),
        (EditField::Impact, Draft::Text(text)) => updated.impact = text.clone(),
        (EditField::Date, Draft::Text(text)) => updated.date = parse_date(text)?,
        (EditField::Category, Draft::Category(category)) => updated.category = *category,
        (EditField::Status, Draft::Status(status)) => updated.status = *status,
        (EditField::TechStack, Draft::TechStack(tags)) => updated.tech_stack = tags.clone(),
        _ => return Err(EditError::DraftMismatch { field }),
    }
    Ok(updated)
}

/// The edit in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveEdit {
    pub id: AchievementId,
    pub field: EditField,
    pub draft: Draft,

    /// Last validation or save failure shown for this edit.
    pub message: Option<String>,
}

/// Editor state for one table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing(ActiveEdit),
    Saving(ActiveEdit),
}

/// Editor errors.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("a save is already in flight")]
    SaveInFlight,

    #[error("no field is being edited")]
    NotEditing,

    #[error("draft does not fit field {field}")]
    DraftMismatch { field: EditField },

    #[error("achievement {0} no longer exists")]
    RecordMissing(AchievementId),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to update achievement: {0}")]
    Store(#[from] StoreError),
}

/// Single-slot inline editor.
#[derive(Debug, Default)]
pub struct RowEditor {
    state: EditState,
}

impl RowEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, EditState::Idle)
    }

    /// The active edit, whether Editing or Saving.
    pub fn active(&self) -> Option<&ActiveEdit> {
        match &self.state {
            EditState::Idle => None,
            EditState::Editing(edit) | EditState::Saving(edit) => Some(edit),
        }
    }

    /// Whether `(id, field)` is the cell under edit.
    pub fn is_editing(&self, id: &AchievementId, field: EditField) -> bool {
        self.active()
            .is_some_and(|edit| &edit.id == id && edit.field == field)
    }

    /// Begin editing `field` of `record`, seeding the draft with its value.
    ///
    /// An edit already in the Editing state is discarded.
    pub fn start(&mut self, record: &Achievement, field: EditField) -> Result<(), EditError> {
        match &self.state {
            EditState::Saving(_) => return Err(EditError::SaveInFlight),
            EditState::Editing(prior) => {
                debug!(id = %prior.id, field = %prior.field, "discarding unsaved draft");
            }
            EditState::Idle => {}
        }

        debug!(id = %record.id, %field, "editing field");
        self.state = EditState::Editing(ActiveEdit {
            id: record.id.clone(),
            field,
            draft: Draft::for_field(record, field),
            message: None,
        });
        Ok(())
    }

    /// Replace the working draft.
    pub fn set_draft(&mut self, draft: Draft) -> Result<(), EditError> {
        match &mut self.state {
            EditState::Editing(edit) => {
                if !draft.fits(edit.field) {
                    return Err(EditError::DraftMismatch { field: edit.field });
                }
                edit.draft = draft;
                Ok(())
            }
            EditState::Saving(_) => Err(EditError::SaveInFlight),
            EditState::Idle => Err(EditError::NotEditing),
        }
    }

    /// Discard the draft.
    pub fn cancel(&mut self) -> Result<(), EditError> {
        match &self.state {
            EditState::Saving(_) => Err(EditError::SaveInFlight),
            EditState::Idle => Ok(()),
            EditState::Editing(edit) => {
                debug!(id = %edit.id, field = %edit.field, "edit cancelled");
                self.state = EditState::Idle;
                Ok(())
            }
        }
    }

    /// Validate the draft against `records` and move to Saving.
    ///
    /// Returns the record to send to the store. On a validation failure the
    /// editor stays in Editing with the message recorded on the edit.
    pub fn begin_save(&mut self, records: &[Achievement]) -> Result<Achievement, EditError> {
        let edit = match &mut self.state {
            EditState::Editing(edit) => edit,
            EditState::Saving(_) => return Err(EditError::SaveInFlight),
            EditState::Idle => return Err(EditError::NotEditing),
        };

        let record = records
            .iter()
            .find(|r| r.id == edit.id)
            .ok_or_else(|| EditError::RecordMissing(edit.id.clone()))?;

        match apply_draft(record, edit.field, &edit.draft) {
            Ok(updated) => {
                edit.message = None;
                let edit = edit.clone();
                debug!(id = %edit.id, field = %edit.field, "saving field");
                self.state = EditState::Saving(edit);
                Ok(updated)
            }
            Err(e) => {
                edit.message = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Resolve a save started with [`begin_save`](Self::begin_save).
    ///
    /// Success returns to Idle. Failure returns to Editing with the draft
    /// preserved so the user can retry or cancel.
    pub fn finish_save(
        &mut self,
        outcome: Result<Achievement, StoreError>,
    ) -> Result<Achievement, EditError> {
        let edit = match std::mem::take(&mut self.state) {
            EditState::Saving(edit) => edit,
            other => {
                self.state = other;
                return Err(EditError::NotEditing);
            }
        };

        match outcome {
            Ok(saved) => {
                debug!(id = %saved.id, field = %edit.field, "field saved");
                Ok(saved)
            }
            Err(e) => {
                let e = EditError::Store(e);
                self.state = EditState::Editing(ActiveEdit {
                    message: Some(e.to_string()),
                    ..edit
                });
                Err(e)
            }
        }
    }

    /// Validate, update through `store`, and resolve.
    pub async fn save(
        &mut self,
        store: &dyn RecordStore,
        records: &[Achievement],
    ) -> Result<Achievement, EditError> {
        let updated = self.begin_save(records)?;
        let outcome = store.update(updated).await;
        self.finish_save(outcome)
    }
}
