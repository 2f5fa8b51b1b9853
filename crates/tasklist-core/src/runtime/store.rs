// crates/tasklist-core/src/runtime/store.rs
// ============================================================================
// Module: Tasklist In-Memory Store
// Description: Process-local item store and the shared store wrapper.
// Purpose: Provide a dependency-free store and a clonable injection handle.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! [`InMemoryItemStore`] keeps items in an ordered map for the life of the
//! process. [`SharedItemStore`] wraps any [`ItemStore`] in an `Arc` so a
//! single store can be handed to every request handler.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use crate::core::Description;
use crate::core::ItemId;
use crate::core::ToDoItem;
use crate::interfaces::ItemStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// Mutable state behind the in-memory store lock.
#[derive(Debug, Default)]
struct InMemoryState {
    /// Items keyed by identifier.
    items: BTreeMap<ItemId, ToDoItem>,
    /// Last identifier handed out (zero before the first create).
    last_id: u64,
}

/// In-memory item store.
///
/// # Invariants
/// - Identifiers increase monotonically and are never reused, even after
///   the highest item is deleted.
#[derive(Debug, Default, Clone)]
pub struct InMemoryItemStore {
    /// Item state protected by a mutex.
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryItemStore {
    /// Creates a new, empty in-memory item store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` with exclusive access to the store state.
    fn with_state<T>(
        &self,
        f: impl FnOnce(&mut InMemoryState) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut guard = self
            .state
            .lock()
            .map_err(|_| StoreError::Store("item store mutex poisoned".to_string()))?;
        f(&mut guard)
    }
}

impl ItemStore for InMemoryItemStore {
    fn list(&self) -> Result<Vec<ToDoItem>, StoreError> {
        self.with_state(|state| Ok(state.items.values().cloned().collect()))
    }

    fn create(&self, description: &Description) -> Result<ToDoItem, StoreError> {
        self.with_state(|state| {
            let next = state
                .last_id
                .checked_add(1)
                .and_then(ItemId::from_raw)
                .ok_or_else(|| StoreError::Store("item identifiers exhausted".to_string()))?;
            let item = ToDoItem::new(next, description.clone());
            state.last_id = next.get();
            state.items.insert(next, item.clone());
            Ok(item)
        })
    }

    fn get(&self, id: ItemId) -> Result<Option<ToDoItem>, StoreError> {
        self.with_state(|state| Ok(state.items.get(&id).cloned()))
    }

    fn update(&self, id: ItemId, completed: bool) -> Result<ToDoItem, StoreError> {
        self.with_state(|state| {
            let item = state.items.get_mut(&id).ok_or(StoreError::NotFound(id))?;
            item.completed = completed;
            Ok(item.clone())
        })
    }

    fn delete(&self, id: ItemId) -> Result<(), StoreError> {
        self.with_state(|state| {
            state.items.remove(&id).map(|_| ()).ok_or(StoreError::NotFound(id))
        })
    }
}

// ============================================================================
// SECTION: Shared Store Wrapper
// ============================================================================

/// Shared item store backed by an `Arc` trait object.
#[derive(Clone)]
pub struct SharedItemStore {
    /// Inner store implementation.
    inner: Arc<dyn ItemStore + Send + Sync>,
}

impl SharedItemStore {
    /// Wraps an item store in a shared, clonable wrapper.
    #[must_use]
    pub fn from_store(store: impl ItemStore + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }
}

impl ItemStore for SharedItemStore {
    fn list(&self) -> Result<Vec<ToDoItem>, StoreError> {
        self.inner.list()
    }

    fn create(&self, description: &Description) -> Result<ToDoItem, StoreError> {
        self.inner.create(description)
    }

    fn get(&self, id: ItemId) -> Result<Option<ToDoItem>, StoreError> {
        self.inner.get(id)
    }

    fn update(&self, id: ItemId, completed: bool) -> Result<ToDoItem, StoreError> {
        self.inner.update(id, completed)
    }

    fn delete(&self, id: ItemId) -> Result<(), StoreError> {
        self.inner.delete(id)
    }
}
