// crates/tasklist-store-sqlite/src/lib.rs
// ============================================================================
// Module: SQLite Item Store
// Description: ItemStore backend using an in-memory SQLite database.
// Purpose: Provide the default item store for the Tasklist server.
// Dependencies: tasklist-core, rusqlite
// ============================================================================

//! ## Overview
//! This crate provides a SQLite-backed [`ItemStore`] whose database lives
//! only as long as the process. Every start begins with an empty table and
//! identifiers are never reused within a run.
//!
//! [`ItemStore`]: tasklist_core::ItemStore

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::SqliteItemStore;
pub use store::SqliteStoreError;
