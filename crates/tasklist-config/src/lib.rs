// crates/tasklist-config/src/lib.rs
// ============================================================================
// Module: Tasklist Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for tasklist.toml semantics.
// Dependencies: serde, toml
// ============================================================================

//! ## Overview
//! `tasklist-config` defines the configuration model for the Tasklist server
//! and validates it before any listener or store is built.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
