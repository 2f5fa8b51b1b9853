// crates/tasklist-core/src/runtime/actions.rs
// ============================================================================
// Module: Tasklist Actions
// Description: The logic behind the list, create, update, and delete routes.
// Purpose: Run validate -> persist once -> report, independent of transport.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Each mutating action validates its form, performs a single store
//! operation, and returns an [`ActionOutcome`] describing what happened and
//! which flash messages to show next. Rejected input and unknown item ids are
//! reported as outcomes, never as errors; only backend failures surface as
//! [`StoreError`].
//!
//! ## Invariants
//! - A rejected action performs no store mutation.
//! - Every rejection carries exactly one `error` flash.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use crate::core::CreateForm;
use crate::core::DeleteForm;
use crate::core::FlashMessage;
use crate::core::FormFields;
use crate::core::ItemId;
use crate::core::STARTING_FRESH;
use crate::core::ToDoItem;
use crate::core::UpdateForm;
use crate::core::ValidationError;
use crate::interfaces::ItemStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Route action classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Render the item list.
    List,
    /// Create an item.
    Create,
    /// Update an item's completion flag.
    Update,
    /// Delete an item.
    Delete,
}

impl ActionKind {
    /// Returns the stable action label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Reason an action was rejected without mutating the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Form input failed validation.
    Validation,
    /// The addressed item does not exist.
    NotFound,
}

impl FailureKind {
    /// Returns the stable failure label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
        }
    }
}

/// Result of a mutating action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Action that ran.
    pub action: ActionKind,
    /// Item addressed or created, when known.
    pub item_id: Option<ItemId>,
    /// Messages to show on the next page render.
    pub flashes: Vec<FlashMessage>,
    /// Rejection reason, or `None` when the store was updated.
    pub failure: Option<FailureKind>,
}

impl ActionOutcome {
    /// Returns true when the action changed the store.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        self.failure.is_none()
    }

    /// Outcome for an action that changed the store.
    const fn applied(action: ActionKind, item_id: ItemId) -> Self {
        Self {
            action,
            item_id: Some(item_id),
            flashes: Vec::new(),
            failure: None,
        }
    }

    /// Outcome for rejected form input.
    fn invalid(action: ActionKind, error: &ValidationError) -> Self {
        Self {
            action,
            item_id: None,
            flashes: vec![FlashMessage::error(error.to_string())],
            failure: Some(FailureKind::Validation),
        }
    }

    /// Outcome for an unknown item identifier.
    fn missing(action: ActionKind, item_id: ItemId) -> Self {
        Self {
            action,
            item_id: Some(item_id),
            flashes: vec![FlashMessage::error(format!("Item {item_id} does not exist"))],
            failure: Some(FailureKind::NotFound),
        }
    }

    /// Maps a store result, turning `NotFound` into a rejection.
    fn from_store<T>(
        action: ActionKind,
        item_id: ItemId,
        result: Result<T, StoreError>,
    ) -> Result<Self, StoreError> {
        match result {
            Ok(_) => Ok(Self::applied(action, item_id)),
            Err(StoreError::NotFound(id)) => Ok(Self::missing(action, id)),
            Err(err) => Err(err),
        }
    }
}

// ============================================================================
// SECTION: Actions
// ============================================================================

/// Lists all items in store order.
///
/// # Errors
///
/// Returns [`StoreError`] when the store cannot be read.
pub fn list_items<S: ItemStore + ?Sized>(store: &S) -> Result<Vec<ToDoItem>, StoreError> {
    store.list()
}

/// Validates the create form and stores a new item.
///
/// # Errors
///
/// Returns [`StoreError`] only for backend failures; invalid input is
/// reported through the outcome.
pub fn create_item<S: ItemStore + ?Sized>(
    store: &S,
    fields: &FormFields,
) -> Result<ActionOutcome, StoreError> {
    let form = match CreateForm::from_fields(fields) {
        Ok(form) => form,
        Err(err) => return Ok(ActionOutcome::invalid(ActionKind::Create, &err)),
    };
    let item = store.create(&form.description)?;
    Ok(ActionOutcome::applied(ActionKind::Create, item.id))
}

/// Validates the update form and sets an item's completion flag.
///
/// # Errors
///
/// Returns [`StoreError`] only for backend failures; invalid input and
/// unknown ids are reported through the outcome.
pub fn update_item<S: ItemStore + ?Sized>(
    store: &S,
    fields: &FormFields,
) -> Result<ActionOutcome, StoreError> {
    let form = match UpdateForm::from_fields(fields) {
        Ok(form) => form,
        Err(err) => return Ok(ActionOutcome::invalid(ActionKind::Update, &err)),
    };
    if store.get(form.id)?.is_none() {
        return Ok(ActionOutcome::missing(ActionKind::Update, form.id));
    }
    ActionOutcome::from_store(ActionKind::Update, form.id, store.update(form.id, form.completed))
}

/// Validates the delete form and removes an item.
///
/// # Errors
///
/// Returns [`StoreError`] only for backend failures; invalid input and
/// unknown ids are reported through the outcome.
pub fn delete_item<S: ItemStore + ?Sized>(
    store: &S,
    fields: &FormFields,
) -> Result<ActionOutcome, StoreError> {
    let form = match DeleteForm::from_fields(fields) {
        Ok(form) => form,
        Err(err) => return Ok(ActionOutcome::invalid(ActionKind::Delete, &err)),
    };
    if store.get(form.id)?.is_none() {
        return Ok(ActionOutcome::missing(ActionKind::Delete, form.id));
    }
    ActionOutcome::from_store(ActionKind::Delete, form.id, store.delete(form.id))
}

// ============================================================================
// SECTION: Startup Notice
// ============================================================================

/// One-shot notice emitted on the first request a process handles.
///
/// # Invariants
/// - [`StartupNotice::take`] yields a message at most once per instance.
#[derive(Debug)]
pub struct StartupNotice {
    /// Whether the notice is still pending.
    pending: AtomicBool,
}

impl Default for StartupNotice {
    fn default() -> Self {
        Self::new()
    }
}

impl StartupNotice {
    /// Creates a pending notice.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(true),
        }
    }

    /// Returns the startup message the first time it is called.
    #[must_use]
    pub fn take(&self) -> Option<FlashMessage> {
        self.pending.swap(false, Ordering::AcqRel).then(|| FlashMessage::info(STARTING_FRESH))
    }
}
