// crates/tasklist-core/src/runtime/mod.rs
// ============================================================================
// Module: Tasklist Runtime
// Description: Route actions and the in-memory item store.
// Purpose: Execute validated requests against an item store.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules hold the logic behind each route and a process-local
//! store. Every transport must call into the same actions so behavior does
//! not drift between entry points.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod actions;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use actions::ActionKind;
pub use actions::ActionOutcome;
pub use actions::FailureKind;
pub use actions::StartupNotice;
pub use actions::create_item;
pub use actions::delete_item;
pub use actions::list_items;
pub use actions::update_item;
pub use store::InMemoryItemStore;
pub use store::SharedItemStore;
