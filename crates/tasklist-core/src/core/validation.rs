// crates/tasklist-core/src/core/validation.rs
// ============================================================================
// Module: Tasklist Form Validation
// Description: Stateless schemas for the create, update, and delete forms.
// Purpose: Coerce untrusted form fields into typed values or reject them.
// Dependencies: thiserror, url
// ============================================================================

//! ## Overview
//! Each route has one schema. A schema checks that every required field is
//! present exactly once, coerces it to its typed form, and rejects fields it
//! does not know. All failing fields are reported together in a single
//! [`ValidationError`], sorted by field name.
//!
//! ## Invariants
//! - Validators are the only code that reads raw form values.
//! - A rejected form never produces a partially populated typed value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

use crate::core::item::Description;
use crate::core::item::DescriptionError;
use crate::core::item::ItemId;
use crate::core::item::MAX_DESCRIPTION_BYTES;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Form field carrying a new item description.
pub const DESCRIPTION_FIELD: &str = "description";
/// Form field carrying an item identifier.
pub const ID_FIELD: &str = "id";
/// Form field carrying the desired completion flag.
pub const COMPLETED_FIELD: &str = "completed";

/// Accepted spellings of `true`, compared case-insensitively.
const TRUE_VALUES: [&str; 6] = ["true", "t", "yes", "y", "on", "1"];
/// Accepted spellings of `false`, compared case-insensitively.
const FALSE_VALUES: [&str; 6] = ["false", "f", "no", "n", "off", "0"];

// ============================================================================
// SECTION: Form Fields
// ============================================================================

/// Decoded form body as submitted, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    /// Name/value pairs, duplicates preserved.
    pairs: Vec<(String, String)>,
}

impl FormFields {
    /// Decodes an `application/x-www-form-urlencoded` body.
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected; the
    /// resulting text is still subject to schema validation.
    #[must_use]
    pub fn from_urlencoded(body: &[u8]) -> Self {
        Self::from_pairs(url::form_urlencoded::parse(body).into_owned())
    }

    /// Builds form fields from name/value pairs.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs.into_iter().map(|(name, value)| (name.into(), value.into())).collect(),
        }
    }

    /// Returns the single value for `name`, rejecting absent or repeated fields.
    fn lookup(&self, name: &str) -> Result<&str, FieldErrorKind> {
        let mut values = self.pairs.iter().filter(|(key, _)| key == name).map(|(_, value)| value);
        let first = values.next().ok_or(FieldErrorKind::Missing)?;
        if values.next().is_some() {
            return Err(FieldErrorKind::Duplicate);
        }
        Ok(first.as_str())
    }

    /// Returns each submitted field name once, in sorted order.
    fn names(&self) -> BTreeSet<&str> {
        self.pairs.iter().map(|(name, _)| name.as_str()).collect()
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Reason a single field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// Required field was not submitted.
    Missing,
    /// Field was submitted with an empty value.
    Empty,
    /// Field value exceeds its length limit.
    TooLong {
        /// Maximum accepted length in bytes.
        max_bytes: usize,
    },
    /// Field value is not a number.
    NotANumber,
    /// Field value is a number but cannot address an item.
    NotAnItemId,
    /// Field value is not a recognized boolean spelling.
    NotABoolean,
    /// Field is not part of the schema.
    Unexpected,
    /// Field was submitted more than once.
    Duplicate,
}

/// A single failing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Submitted field name.
    pub field: String,
    /// Failure reason.
    pub kind: FieldErrorKind,
}

impl FieldError {
    /// Creates a field error.
    #[must_use]
    pub fn new(field: impl Into<String>, kind: FieldErrorKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }

    /// Returns the user-facing message for this failure.
    #[must_use]
    pub fn message(&self) -> String {
        match self.kind {
            FieldErrorKind::Missing => "Missing value".to_string(),
            FieldErrorKind::Empty => "Please enter a value".to_string(),
            FieldErrorKind::TooLong {
                max_bytes,
            } => format!("Enter a value not more than {max_bytes} characters long"),
            FieldErrorKind::NotANumber => "Please enter a number".to_string(),
            FieldErrorKind::NotAnItemId => {
                "Please enter a whole number greater than zero".to_string()
            }
            FieldErrorKind::NotABoolean => "Value should be 'true' or 'false'".to_string(),
            FieldErrorKind::Unexpected => {
                format!("The input field '{}' was not expected", self.field)
            }
            FieldErrorKind::Duplicate => {
                format!("The input field '{}' was given more than once", self.field)
            }
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message())
    }
}

/// Form validation failure covering every failing field.
///
/// # Invariants
/// - `errors` is sorted by field name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_field_errors(.errors))]
pub struct ValidationError {
    /// Failing fields.
    errors: Vec<FieldError>,
}

impl ValidationError {
    /// Creates a validation error from field failures.
    #[must_use]
    pub fn new(mut errors: Vec<FieldError>) -> Self {
        errors.sort_by(|a, b| a.field.cmp(&b.field));
        Self {
            errors,
        }
    }

    /// Returns the failing fields, sorted by name.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns the failure reason for `field`, if it failed.
    #[must_use]
    pub fn kind_of(&self, field: &str) -> Option<FieldErrorKind> {
        self.errors.iter().find(|error| error.field == field).map(|error| error.kind)
    }
}

/// Renders field errors as a single `; `-separated line.
fn join_field_errors(errors: &[FieldError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

// ============================================================================
// SECTION: Schemas
// ============================================================================

/// Validated input for creating an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateForm {
    /// Description for the new item.
    pub description: Description,
}

impl CreateForm {
    /// Validates the create form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when `description` is missing, empty, too
    /// long, or when unexpected fields are present.
    pub fn from_fields(fields: &FormFields) -> Result<Self, ValidationError> {
        let mut checker = FieldChecker::new(fields, &[DESCRIPTION_FIELD]);
        let description = checker.field(DESCRIPTION_FIELD, parse_description);
        checker.finish(description.map(|description| Self {
            description,
        }))
    }
}

/// Validated input for updating an item's completion flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateForm {
    /// Item to update.
    pub id: ItemId,
    /// Desired completion state.
    pub completed: bool,
}

impl UpdateForm {
    /// Validates the update form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when `id` or `completed` are missing or
    /// cannot be coerced, or when unexpected fields are present.
    pub fn from_fields(fields: &FormFields) -> Result<Self, ValidationError> {
        let mut checker = FieldChecker::new(fields, &[COMPLETED_FIELD, ID_FIELD]);
        let id = checker.field(ID_FIELD, parse_item_id);
        let completed = checker.field(COMPLETED_FIELD, parse_bool);
        checker.finish(id.zip(completed).map(|(id, completed)| Self {
            id,
            completed,
        }))
    }
}

/// Validated input for deleting an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteForm {
    /// Item to delete.
    pub id: ItemId,
}

impl DeleteForm {
    /// Validates the delete form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when `id` is missing or cannot be coerced,
    /// or when unexpected fields are present.
    pub fn from_fields(fields: &FormFields) -> Result<Self, ValidationError> {
        let mut checker = FieldChecker::new(fields, &[ID_FIELD]);
        let id = checker.field(ID_FIELD, parse_item_id);
        checker.finish(id.map(|id| Self {
            id,
        }))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Accumulates field failures while a schema is evaluated.
struct FieldChecker<'a> {
    /// Fields under validation.
    fields: &'a FormFields,
    /// Failures recorded so far.
    errors: Vec<FieldError>,
}

impl<'a> FieldChecker<'a> {
    /// Starts a check, recording any field not listed in `allowed`.
    fn new(fields: &'a FormFields, allowed: &[&str]) -> Self {
        let errors = fields
            .names()
            .into_iter()
            .filter(|name| !allowed.contains(name))
            .map(|name| FieldError::new(name, FieldErrorKind::Unexpected))
            .collect();
        Self {
            fields,
            errors,
        }
    }

    /// Looks up and coerces a required field, recording failures.
    fn field<T>(
        &mut self,
        name: &str,
        parse: fn(&str) -> Result<T, FieldErrorKind>,
    ) -> Option<T> {
        match self.fields.lookup(name).and_then(parse) {
            Ok(value) => Some(value),
            Err(kind) => {
                self.errors.push(FieldError::new(name, kind));
                None
            }
        }
    }

    /// Returns the typed form when no field failed.
    fn finish<T>(self, value: Option<T>) -> Result<T, ValidationError> {
        match value {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => Err(ValidationError::new(self.errors)),
        }
    }
}

/// Coerces description text.
fn parse_description(value: &str) -> Result<Description, FieldErrorKind> {
    Description::parse(value).map_err(|err| match err {
        DescriptionError::Empty => FieldErrorKind::Empty,
        DescriptionError::TooLong {
            ..
        } => FieldErrorKind::TooLong {
            max_bytes: MAX_DESCRIPTION_BYTES,
        },
    })
}

/// Coerces an item identifier, accepting integral decimals such as `3.0`.
fn parse_item_id(value: &str) -> Result<ItemId, FieldErrorKind> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldErrorKind::Empty);
    }
    let whole = match trimmed.split_once('.') {
        Some((whole, fraction)) if fraction.bytes().all(|byte| byte == b'0') => {
            match whole {
                "" | "+" | "-" if !fraction.is_empty() => "0",
                other => other,
            }
        }
        Some(_) => {
            return Err(if trimmed.parse::<f64>().is_ok() {
                FieldErrorKind::NotAnItemId
            } else {
                FieldErrorKind::NotANumber
            });
        }
        None => trimmed,
    };
    let raw = whole.parse::<i128>().map_err(|_| FieldErrorKind::NotANumber)?;
    u64::try_from(raw).ok().and_then(ItemId::from_raw).ok_or(FieldErrorKind::NotAnItemId)
}

/// Coerces a boolean from its common form spellings.
fn parse_bool(value: &str) -> Result<bool, FieldErrorKind> {
    let normalized = value.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return Err(FieldErrorKind::Empty);
    }
    if TRUE_VALUES.contains(&normalized.as_str()) {
        return Ok(true);
    }
    if FALSE_VALUES.contains(&normalized.as_str()) {
        return Ok(false);
    }
    Err(FieldErrorKind::NotABoolean)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
