// crates/tasklist-core/src/core/flash.rs
// ============================================================================
// Module: Tasklist Flash Messages
// Description: One-time notifications shown on the next rendered page.
// Purpose: Carry user-visible action feedback as plain values.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Flash messages are returned by actions alongside the redirect they
//! trigger. Transports decide how to carry them to the next page render;
//! nothing in this crate holds them between requests.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Informational message queued on the first request after startup.
pub const STARTING_FRESH: &str = "Starting fresh";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Flash message category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashLevel {
    /// Informational notice.
    Info,
    /// Failed action.
    Error,
}

impl FlashLevel {
    /// Returns the stable category label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

/// A single flash message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    /// Message category.
    pub level: FlashLevel,
    /// Human-readable text.
    pub text: String,
}

impl FlashMessage {
    /// Creates an informational flash message.
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Info,
            text: text.into(),
        }
    }

    /// Creates an error flash message.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            text: text.into(),
        }
    }
}
