//! Field constraints for achievement records.
//!
//! Text lengths are counted in characters after trimming surrounding
//! whitespace. Enumerated fields are constrained by their types, so only
//! text, date and tag-list fields can fail here.

use crate::editor::EditField;
use crate::types::{AchievementInput, TechTag};
use chrono::NaiveDate;
use std::fmt;

pub const TITLE_MIN_LENGTH: usize = 3;
pub const TITLE_MAX_LENGTH: usize = 100;

pub const DESCRIPTION_MIN_LENGTH: usize = 10;
pub const DESCRIPTION_MAX_LENGTH: usize = 500;

pub const IMPACT_MIN_LENGTH: usize = 10;
pub const IMPACT_MAX_LENGTH: usize = 200;

/// What went wrong with a field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationKind {
    Required,
    TooShort { min: usize },
    TooLong { max: usize },
    InvalidDate,
    DuplicateTag(TechTag),
}

/// A field failed its constraint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    pub field: EditField,
    pub kind: ValidationKind,
}

impl ValidationError {
    pub fn new(field: EditField, kind: ValidationKind) -> Self {
        Self { field, kind }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.field.label();
        match &self.kind {
            ValidationKind::Required => write!(f, "{} is required", label),
            ValidationKind::TooShort { min } => {
                write!(f, "{} must be at least {} characters", label, min)
            }
            ValidationKind::TooLong { max } => {
                write!(f, "{} must not exceed {} characters", label, max)
            }
            ValidationKind::InvalidDate => f.write_str("Invalid date format"),
            ValidationKind::DuplicateTag(tag) => {
                write!(f, "Duplicate tech stack item: {}", tag)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Length bounds for a text field, `None` for non-text fields.
pub fn length_bounds(field: EditField) -> Option<(usize, usize)> {
    match field {
        EditField::Title => Some((TITLE_MIN_LENGTH, TITLE_MAX_LENGTH)),
        EditField::Description => Some((DESCRIPTION_MIN_LENGTH, DESCRIPTION_MAX_LENGTH)),
        EditField::Impact => Some((IMPACT_MIN_LENGTH, IMPACT_MAX_LENGTH)),
        _ => None,
    }
}

/// Check a free-text field against its length bounds.
pub fn validate_text(field: EditField, value: &str) -> Result<(), ValidationError> {
    let Some((min, max)) = length_bounds(field) else {
        return Ok(());
    };

    // Minimum on the trimmed text, maximum on what is actually stored.
    let len = value.trim().chars().count();
    if len == 0 {
        Err(ValidationError::new(field, ValidationKind::Required))
    } else if len < min {
        Err(ValidationError::new(field, ValidationKind::TooShort { min }))
    } else if value.chars().count() > max {
        Err(ValidationError::new(field, ValidationKind::TooLong { max }))
    } else {
        Ok(())
    }
}

/// Parse an ISO `YYYY-MM-DD` date typed into the date field.
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::new(EditField::Date, ValidationKind::Required));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ValidationError::new(EditField::Date, ValidationKind::InvalidDate))
}

pub fn validate_tech_stack(tags: &[TechTag]) -> Result<(), ValidationError> {
    for (i, tag) in tags.iter().enumerate() {
        if tags[..i].contains(tag) {
            return Err(ValidationError::new(
                EditField::TechStack,
                ValidationKind::DuplicateTag(*tag),
            ));
        }
    }
    Ok(())
}

/// Validate every field of a record; reports the first failure in column order.
pub fn validate_input(input: &AchievementInput) -> Result<(), ValidationError> {
    validate_text(EditField::Title, &input.title)?;
    validate_text(EditField::Description, &input.description)?;
    validate_text(EditField::Impact, &input.impact)?;
    validate_tech_stack(&input.tech_stack)
}
