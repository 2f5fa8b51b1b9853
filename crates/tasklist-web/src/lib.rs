// crates/tasklist-web/src/lib.rs
// ============================================================================
// Module: Tasklist Web
// Description: HTTP front end for the Tasklist to-do application.
// Purpose: Serve the list page and form actions over axum.
// Dependencies: tasklist-core, tasklist-config, tasklist-store-sqlite, axum, tokio
// ============================================================================

//! ## Overview
//! Tasklist web binds the core actions to HTTP. [`TasklistServer`] builds the
//! configured store and audit sink, and exposes an axum [`axum::Router`] for
//! in-process use or serves it on a TCP listener. All route behavior lives in
//! [`tasklist_core::runtime`]; this crate only decodes forms, renders HTML,
//! and carries flash messages across redirects.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod flash;
pub mod page;
pub mod server;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditSink;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::RequestAuditEvent;
pub use audit::RequestOutcome;
pub use audit::ServerAuditEvent;
pub use audit::ServerEventKind;
pub use audit::StderrAuditSink;
pub use flash::FLASH_COOKIE;
pub use server::ServerError;
pub use server::TasklistServer;
