// crates/tasklist-core/src/interfaces/mod.rs
// ============================================================================
// Module: Tasklist Interfaces
// Description: Backend-agnostic persistence interface for to-do items.
// Purpose: Let actions run unchanged over any item store implementation.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! [`ItemStore`] is the only seam between the actions and persistence. Every
//! implementation owns its records outright; callers receive clones and
//! never hold references across requests.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::Description;
use crate::core::ItemId;
use crate::core::ToDoItem;

// ============================================================================
// SECTION: Item Store
// ============================================================================

/// Item store errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No item exists with the given identifier.
    #[error("item {0} does not exist")]
    NotFound(ItemId),
    /// Store backend error.
    #[error("item store error: {0}")]
    Store(String),
    /// Stored data violates item invariants.
    #[error("item store invalid data: {0}")]
    Invalid(String),
}

/// Persistence for to-do items.
///
/// # Invariants
/// - `list` returns items in ascending identifier (insertion) order.
/// - Identifiers are assigned by the store and never reused.
/// - A failed call leaves the store unchanged.
pub trait ItemStore {
    /// Lists all items in identifier order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be read.
    fn list(&self) -> Result<Vec<ToDoItem>, StoreError>;

    /// Creates a new item with `completed = false`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the item cannot be persisted.
    fn create(&self, description: &Description) -> Result<ToDoItem, StoreError>;

    /// Loads an item by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be read.
    fn get(&self, id: ItemId) -> Result<Option<ToDoItem>, StoreError>;

    /// Sets the completion flag of an existing item.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no item has `id`.
    fn update(&self, id: ItemId, completed: bool) -> Result<ToDoItem, StoreError>;

    /// Deletes an existing item.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no item has `id`.
    fn delete(&self, id: ItemId) -> Result<(), StoreError>;
}
