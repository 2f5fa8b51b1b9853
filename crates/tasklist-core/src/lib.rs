// crates/tasklist-core/src/lib.rs
// ============================================================================
// Module: Tasklist Core Library
// Description: Public API surface for the Tasklist core.
// Purpose: Expose item types, validators, store interfaces, and actions.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Tasklist core holds everything the to-do application knows about items:
//! the record type, the form validators that turn untrusted input into typed
//! values, the [`ItemStore`] interface, and the actions that back each HTTP
//! route. It has no HTTP or database dependency; transports and storage
//! backends integrate through [`ItemStore`] and [`ActionOutcome`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use self::core::*;

pub use interfaces::ItemStore;
pub use interfaces::StoreError;
pub use runtime::ActionKind;
pub use runtime::ActionOutcome;
pub use runtime::FailureKind;
pub use runtime::InMemoryItemStore;
pub use runtime::SharedItemStore;
pub use runtime::StartupNotice;
