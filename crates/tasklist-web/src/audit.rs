// crates/tasklist-web/src/audit.rs
// ============================================================================
// Module: Tasklist Audit Logging
// Description: Structured audit events for request handling and lifecycle.
// Purpose: Emit JSON-line logs without a logging framework dependency.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! This module defines audit event payloads and sinks for the HTTP server.
//! Events carry identifiers and counts only; item descriptions and flash
//! text are never logged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;
use tasklist_core::ActionOutcome;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Request outcome classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestOutcome {
    /// The request was served and any mutation applied.
    Ok,
    /// The request was answered with an error flash and no mutation.
    Rejected,
    /// The store failed and the request was answered with a 500.
    Error,
}

/// Server lifecycle classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerEventKind {
    /// Listener bound and accepting connections.
    Started,
    /// Listener shut down.
    Stopped,
}

/// Per-request audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct RequestAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Route path that handled the request.
    pub route: &'static str,
    /// Request outcome.
    pub outcome: RequestOutcome,
    /// Normalized error kind label.
    pub error_kind: Option<&'static str>,
    /// Item addressed or created, when known.
    pub item_id: Option<u64>,
    /// Number of flash messages queued or rendered.
    pub flash_count: usize,
}

impl RequestAuditEvent {
    /// Builds an event for a successful page render.
    #[must_use]
    pub fn rendered(route: &'static str, flash_count: usize) -> Self {
        Self::new(route, RequestOutcome::Ok, None, None, flash_count)
    }

    /// Builds an event from a mutating action outcome.
    #[must_use]
    pub fn from_outcome(route: &'static str, outcome: &ActionOutcome, flash_count: usize) -> Self {
        let (result, error_kind) = outcome
            .failure
            .map_or((RequestOutcome::Ok, None), |failure| {
                (RequestOutcome::Rejected, Some(failure.as_str()))
            });
        Self::new(route, result, error_kind, outcome.item_id.map(|id| id.get()), flash_count)
    }

    /// Builds an event for a store failure.
    #[must_use]
    pub fn store_failure(route: &'static str) -> Self {
        Self::new(route, RequestOutcome::Error, Some("store"), None, 0)
    }

    /// Builds a request event stamped with the current time.
    fn new(
        route: &'static str,
        outcome: RequestOutcome,
        error_kind: Option<&'static str>,
        item_id: Option<u64>,
        flash_count: usize,
    ) -> Self {
        Self {
            event: "tasklist_request",
            timestamp_ms: now_ms(),
            route,
            outcome,
            error_kind,
            item_id,
            flash_count,
        }
    }
}

/// Server lifecycle audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct ServerAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Lifecycle transition.
    pub kind: ServerEventKind,
    /// Bound listener address.
    pub bind: String,
    /// Store backend label.
    pub store: &'static str,
}

impl ServerAuditEvent {
    /// Builds a lifecycle event stamped with the current time.
    #[must_use]
    pub fn new(kind: ServerEventKind, bind: String, store: &'static str) -> Self {
        Self {
            event: "tasklist_server",
            timestamp_ms: now_ms(),
            kind,
            bind,
            store,
        }
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for server events.
pub trait AuditSink: Send + Sync {
    /// Record a request audit event.
    fn record_request(&self, event: &RequestAuditEvent);

    /// Record a lifecycle audit event.
    fn record_server(&self, _event: &ServerAuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record_request(&self, event: &RequestAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }

    fn record_server(&self, event: &ServerAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Appends one serialized event.
    fn append(&self, payload: &str) {
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

impl AuditSink for FileAuditSink {
    fn record_request(&self, event: &RequestAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            self.append(&payload);
        }
    }

    fn record_server(&self, event: &ServerAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            self.append(&payload);
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record_request(&self, _event: &RequestAuditEvent) {}

    fn record_server(&self, _event: &ServerAuditEvent) {}
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Milliseconds since the Unix epoch, or zero if the clock is before it.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |duration| duration.as_millis())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
