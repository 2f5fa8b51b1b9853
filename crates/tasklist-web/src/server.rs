// crates/tasklist-web/src/server.rs
// ============================================================================
// Module: Tasklist HTTP Server
// Description: axum router and listener for the to-do list routes.
// Purpose: Map HTTP requests onto the core actions and back.
// Dependencies: tasklist-core, tasklist-config, tasklist-store-sqlite, axum, tokio
// ============================================================================

//! ## Overview
//! The server exposes four routes. `GET /` renders the list and consumes any
//! pending flash cookie. `POST /post`, `POST /patch`, and `POST /delete` run
//! the matching action and answer `302 Found` to `/`, carrying feedback
//! in the flash cookie. The first request a process handles also queues the
//! startup notice. Store failures answer 500 and are audited; they never
//! leak backend detail to the client.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::DefaultBodyLimit;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::http::header::LOCATION;
use axum::http::header::SET_COOKIE;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use tasklist_config::StoreType;
use tasklist_config::TasklistConfig;
use tasklist_core::ActionOutcome;
use tasklist_core::FlashMessage;
use tasklist_core::FormFields;
use tasklist_core::InMemoryItemStore;
use tasklist_core::SharedItemStore;
use tasklist_core::StartupNotice;
use tasklist_core::StoreError;
use tasklist_core::runtime::create_item;
use tasklist_core::runtime::delete_item;
use tasklist_core::runtime::list_items;
use tasklist_core::runtime::update_item;
use tasklist_store_sqlite::SqliteItemStore;

use crate::audit::AuditSink;
use crate::audit::FileAuditSink;
use crate::audit::NoopAuditSink;
use crate::audit::RequestAuditEvent;
use crate::audit::ServerAuditEvent;
use crate::audit::ServerEventKind;
use crate::audit::StderrAuditSink;
use crate::flash::PendingFlashes;
use crate::flash::clear_flash_cookie;
use crate::flash::set_flash_cookie;
use crate::page::render_list_page;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// List page route.
pub const INDEX_ROUTE: &str = "/";
/// Create route.
pub const CREATE_ROUTE: &str = "/post";
/// Update route.
pub const UPDATE_ROUTE: &str = "/patch";
/// Delete route.
pub const DELETE_ROUTE: &str = "/delete";

// ============================================================================
// SECTION: Tasklist Server
// ============================================================================

/// Tasklist HTTP server instance.
pub struct TasklistServer {
    /// Server configuration.
    config: TasklistConfig,
    /// State shared by every request handler.
    state: Arc<ServerState>,
}

impl TasklistServer {
    /// Builds a new server from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when validation or initialization fails.
    pub fn from_config(config: TasklistConfig) -> Result<Self, ServerError> {
        let store = build_item_store(&config)?;
        Self::with_store(config, store)
    }

    /// Builds a new server around an existing item store.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when validation or audit setup fails.
    pub fn with_store(config: TasklistConfig, store: SharedItemStore) -> Result<Self, ServerError> {
        config.validate().map_err(|err| ServerError::Config(err.to_string()))?;
        let audit = build_audit_sink(&config)?;
        let state = Arc::new(ServerState {
            store,
            startup: StartupNotice::new(),
            audit,
            max_flash_bytes: config.server.max_flash_bytes,
        });
        Ok(Self {
            config,
            state,
        })
    }

    /// Returns the HTTP router; every router shares this server's state.
    #[must_use]
    pub fn router(&self) -> Router {
        build_router(Arc::clone(&self.state), self.config.server.max_body_bytes)
    }

    /// Serves requests until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when the listener cannot bind or the server fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        let addr: SocketAddr =
            self.config.server.bind_addr().map_err(|err| ServerError::Config(err.to_string()))?;
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|_| ServerError::Transport("http bind failed".to_string()))?;
        let bound = listener
            .local_addr()
            .map_err(|_| ServerError::Transport("http bind failed".to_string()))?
            .to_string();
        let store_label = self.config.store.store_type.as_str();
        let started = ServerAuditEvent::new(ServerEventKind::Started, bound.clone(), store_label);
        self.state.audit.record_server(&started);
        let result = axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|_| ServerError::Transport("http server failed".to_string()));
        let stopped = ServerAuditEvent::new(ServerEventKind::Stopped, bound, store_label);
        self.state.audit.record_server(&stopped);
        result
    }
}

/// Builds the item store from configuration.
fn build_item_store(config: &TasklistConfig) -> Result<SharedItemStore, ServerError> {
    let store = match config.store.store_type {
        StoreType::Memory => SharedItemStore::from_store(InMemoryItemStore::new()),
        StoreType::Sqlite => {
            let store = SqliteItemStore::open_in_memory()
                .map_err(|err| ServerError::Init(err.to_string()))?;
            SharedItemStore::from_store(store)
        }
    };
    Ok(store)
}

/// Builds the audit sink from configuration.
fn build_audit_sink(config: &TasklistConfig) -> Result<Arc<dyn AuditSink>, ServerError> {
    let audit = &config.server.audit;
    if !audit.enabled {
        return Ok(Arc::new(NoopAuditSink));
    }
    match &audit.path {
        Some(path) => {
            let sink = FileAuditSink::new(Path::new(path.trim()))
                .map_err(|err| ServerError::Init(format!("audit log open failed: {err}")))?;
            Ok(Arc::new(sink))
        }
        None => Ok(Arc::new(StderrAuditSink)),
    }
}

/// Resolves when the process receives Ctrl-C.
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

// ============================================================================
// SECTION: HTTP Transport
// ============================================================================

/// Shared server state for HTTP handlers.
struct ServerState {
    /// Item store shared by every request.
    store: SharedItemStore,
    /// One-shot startup notice.
    startup: StartupNotice,
    /// Audit sink for request events.
    audit: Arc<dyn AuditSink>,
    /// Maximum encoded flash cookie size.
    max_flash_bytes: usize,
}

/// Signature shared by the mutating actions.
type Action = fn(&SharedItemStore, &FormFields) -> Result<ActionOutcome, StoreError>;

/// Builds the router for the list and action routes.
fn build_router(state: Arc<ServerState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route(INDEX_ROUTE, get(handle_index))
        .route(CREATE_ROUTE, post(handle_create))
        .route(UPDATE_ROUTE, post(handle_update))
        .route(DELETE_ROUTE, post(handle_delete))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

/// Handles `GET /`.
async fn handle_index(State(state): State<Arc<ServerState>>, headers: HeaderMap) -> Response {
    let pending = PendingFlashes::from_headers(&headers);
    let items = match list_items(&state.store) {
        Ok(items) => items,
        Err(_) => return store_failure(&state, INDEX_ROUTE),
    };
    let mut flashes = pending.messages;
    flashes.extend(state.startup.take());
    state.audit.record_request(&RequestAuditEvent::rendered(INDEX_ROUTE, flashes.len()));
    let mut response = Html(render_list_page(&items, &flashes)).into_response();
    if pending.present {
        append_cookie(&mut response, &clear_flash_cookie());
    }
    response
}

/// Handles `POST /post`.
async fn handle_create(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    run_action(&state, CREATE_ROUTE, &headers, &body, create_item)
}

/// Handles `POST /patch`.
async fn handle_update(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    run_action(&state, UPDATE_ROUTE, &headers, &body, update_item)
}

/// Handles `POST /delete`.
async fn handle_delete(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    run_action(&state, DELETE_ROUTE, &headers, &body, delete_item)
}

/// Runs a mutating action and redirects to the list page.
fn run_action(
    state: &ServerState,
    route: &'static str,
    headers: &HeaderMap,
    body: &[u8],
    action: Action,
) -> Response {
    let fields = FormFields::from_urlencoded(body);
    let outcome = match action(&state.store, &fields) {
        Ok(outcome) => outcome,
        Err(_) => return store_failure(state, route),
    };
    let mut flashes: Vec<FlashMessage> = PendingFlashes::from_headers(headers).messages;
    flashes.extend(state.startup.take());
    flashes.extend(outcome.flashes.iter().cloned());
    state.audit.record_request(&RequestAuditEvent::from_outcome(route, &outcome, flashes.len()));
    let mut response = (StatusCode::FOUND, [(LOCATION, INDEX_ROUTE)]).into_response();
    if let Some(cookie) = set_flash_cookie(&flashes, state.max_flash_bytes) {
        append_cookie(&mut response, &cookie);
    }
    response
}

/// Answers a store failure with a bare 500.
fn store_failure(state: &ServerState, route: &'static str) -> Response {
    state.audit.record_request(&RequestAuditEvent::store_failure(route));
    (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
}

/// Adds a `Set-Cookie` header to a response.
fn append_cookie(response: &mut Response, cookie: &str) {
    if let Ok(value) = HeaderValue::from_str(cookie) {
        response.headers_mut().append(SET_COOKIE, value);
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Tasklist server errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================
