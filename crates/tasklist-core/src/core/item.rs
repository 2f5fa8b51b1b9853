// crates/tasklist-core/src/core/item.rs
// ============================================================================
// Module: Tasklist Items
// Description: The to-do item record and its validated field types.
// Purpose: Make invalid items unrepresentable outside the validators.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A [`ToDoItem`] is an identifier, a description, and a completion flag.
//! [`ItemId`] is assigned by the store and never zero. [`Description`] can
//! only be built through [`Description::parse`], which enforces the length
//! bounds for every caller, including stores reading rows back.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::num::NonZeroU64;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum description length in UTF-8 bytes.
pub const MAX_DESCRIPTION_BYTES: usize = 50;

// ============================================================================
// SECTION: Identifiers
// ============================================================================

/// Item identifier assigned by the store on creation.
///
/// # Invariants
/// - Always >= 1 (non-zero, 1-based).
/// - Immutable once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(NonZeroU64);

impl ItemId {
    /// Creates an item identifier from a raw value (returns `None` if zero).
    #[must_use]
    pub fn from_raw(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    /// Returns the raw identifier value (always >= 1).
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.get().fmt(f)
    }
}

// ============================================================================
// SECTION: Description
// ============================================================================

/// Reasons a description is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DescriptionError {
    /// The description is empty.
    #[error("description must not be empty")]
    Empty,
    /// The description exceeds [`MAX_DESCRIPTION_BYTES`].
    #[error("description is {actual_bytes} bytes (max {max})", max = MAX_DESCRIPTION_BYTES)]
    TooLong {
        /// Submitted length in bytes.
        actual_bytes: usize,
    },
}

/// Item description text.
///
/// # Invariants
/// - Never empty.
/// - At most [`MAX_DESCRIPTION_BYTES`] bytes of UTF-8.
/// - Stored verbatim; surrounding whitespace is not trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    /// Validates and wraps description text.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptionError`] when the text is empty or too long.
    pub fn parse(value: impl Into<String>) -> Result<Self, DescriptionError> {
        let value = value.into();
        if value.is_empty() {
            return Err(DescriptionError::Empty);
        }
        if value.len() > MAX_DESCRIPTION_BYTES {
            return Err(DescriptionError::TooLong {
                actual_bytes: value.len(),
            });
        }
        Ok(Self(value))
    }

    /// Returns the description as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<String> for Description {
    type Error = DescriptionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Description> for String {
    fn from(value: Description) -> Self {
        value.0
    }
}

// ============================================================================
// SECTION: Item Record
// ============================================================================

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToDoItem {
    /// Store-assigned identifier.
    pub id: ItemId,
    /// Item description.
    pub description: Description,
    /// Whether the item has been completed.
    pub completed: bool,
}

impl ToDoItem {
    /// Creates a new, not yet completed item.
    #[must_use]
    pub const fn new(id: ItemId, description: Description) -> Self {
        Self {
            id,
            description,
            completed: false,
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
