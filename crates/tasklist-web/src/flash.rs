// crates/tasklist-web/src/flash.rs
// ============================================================================
// Module: Flash Cookie
// Description: Carries flash messages across the POST-redirect-GET cycle.
// Purpose: Encode, decode, and clear the `tasklist_flash` cookie.
// Dependencies: axum, base64, serde_json, tasklist-core
// ============================================================================

//! ## Overview
//! Flash messages ride in a single cookie holding URL-safe base64 of a JSON
//! array. The list page reads the cookie, renders the messages, and clears
//! it. Cookie contents are untrusted: anything that does not decode is
//! ignored.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use tasklist_core::FlashMessage;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Cookie name used for pending flash messages.
pub const FLASH_COOKIE: &str = "tasklist_flash";
/// Attributes appended to every flash cookie.
const COOKIE_ATTRIBUTES: &str = "Path=/; HttpOnly; SameSite=Lax";

// ============================================================================
// SECTION: Encoding
// ============================================================================

/// Encodes flash messages as a cookie value no longer than `max_bytes`.
///
/// Oldest messages are dropped first until the encoding fits. Returns `None`
/// when no message fits.
#[must_use]
pub fn encode_flashes(messages: &[FlashMessage], max_bytes: usize) -> Option<String> {
    (0 .. messages.len()).find_map(|start| {
        let payload = serde_json::to_vec(&messages[start ..]).ok()?;
        let encoded = URL_SAFE_NO_PAD.encode(payload);
        (encoded.len() <= max_bytes).then_some(encoded)
    })
}

/// Decodes a cookie value, returning `None` when it is malformed.
#[must_use]
pub fn decode_flashes(value: &str) -> Option<Vec<FlashMessage>> {
    let payload = URL_SAFE_NO_PAD.decode(value.trim()).ok()?;
    serde_json::from_slice(&payload).ok()
}

/// Builds the `Set-Cookie` value that stores `messages`.
#[must_use]
pub fn set_flash_cookie(messages: &[FlashMessage], max_bytes: usize) -> Option<String> {
    encode_flashes(messages, max_bytes)
        .map(|encoded| format!("{FLASH_COOKIE}={encoded}; {COOKIE_ATTRIBUTES}"))
}

/// Builds the `Set-Cookie` value that removes the flash cookie.
#[must_use]
pub fn clear_flash_cookie() -> String {
    format!("{FLASH_COOKIE}=; {COOKIE_ATTRIBUTES}; Max-Age=0")
}

// ============================================================================
// SECTION: Request Parsing
// ============================================================================

/// Pending flash messages read from request cookies.
#[derive(Debug, Default)]
pub struct PendingFlashes {
    /// Messages decoded from the cookie.
    pub messages: Vec<FlashMessage>,
    /// Whether the request carried a flash cookie at all.
    pub present: bool,
}

impl PendingFlashes {
    /// Reads the flash cookie from request headers.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut pending = Self::default();
        let pairs = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|line| line.split(';'))
            .filter_map(|pair| pair.trim().split_once('='));
        for (name, value) in pairs {
            if name != FLASH_COOKIE {
                continue;
            }
            pending.present = true;
            if let Some(messages) = decode_flashes(value) {
                pending.messages.extend(messages);
            }
        }
        pending
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
