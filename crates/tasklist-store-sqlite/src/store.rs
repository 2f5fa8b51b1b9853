// crates/tasklist-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Item Store
// Description: ItemStore backed by an in-memory SQLite database.
// Purpose: Persist to-do items for the life of the process.
// Dependencies: tasklist-core, rusqlite, thiserror
// ============================================================================

//! ## Overview
//! [`SqliteItemStore`] opens a private in-memory database, creates the
//! `items` table, and serves every [`ItemStore`] call through one
//! mutex-guarded connection. Mutations run in a transaction. Rows read back
//! from the database are re-validated before they are returned, so a row
//! that violates item bounds surfaces as [`StoreError::Invalid`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;
use std::sync::MutexGuard;

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::params;
use tasklist_core::Description;
use tasklist_core::ItemId;
use tasklist_core::ItemStore;
use tasklist_core::MAX_DESCRIPTION_BYTES;
use tasklist_core::StoreError;
use tasklist_core::ToDoItem;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// `SQLite` store errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SqliteStoreError {
    /// `SQLite` engine error.
    #[error("sqlite store db error: {0}")]
    Db(String),
    /// Invalid store data.
    #[error("sqlite store invalid data: {0}")]
    Invalid(String),
    /// The addressed row does not exist.
    #[error("sqlite store item not found: {0}")]
    NotFound(ItemId),
}

impl From<SqliteStoreError> for StoreError {
    fn from(error: SqliteStoreError) -> Self {
        match error {
            SqliteStoreError::Db(message) => Self::Store(message),
            SqliteStoreError::Invalid(message) => Self::Invalid(message),
            SqliteStoreError::NotFound(id) => Self::NotFound(id),
        }
    }
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// `SQLite`-backed item store.
///
/// # Invariants
/// - The database is private to this instance and starts empty.
/// - `AUTOINCREMENT` keeps identifiers unique even after the highest row is
///   deleted.
pub struct SqliteItemStore {
    /// Connection guarded for exclusive use by one call at a time.
    connection: Mutex<Connection>,
}

impl SqliteItemStore {
    /// Opens an empty in-memory store.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the database cannot be opened or the
    /// schema cannot be created.
    pub fn open_in_memory() -> Result<Self, SqliteStoreError> {
        let mut connection =
            Connection::open_in_memory().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        initialize_schema(&mut connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    /// Locks the connection.
    fn lock(&self) -> Result<MutexGuard<'_, Connection>, SqliteStoreError> {
        self.connection
            .lock()
            .map_err(|_| SqliteStoreError::Db("mutex poisoned".to_string()))
    }

    /// Lists all rows in identifier order.
    fn list_rows(&self) -> Result<Vec<ToDoItem>, SqliteStoreError> {
        let guard = self.lock()?;
        let mut stmt = guard
            .prepare("SELECT id, description, completed FROM items ORDER BY id")
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        let rows = stmt
            .query_map(params![], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        let mut items = Vec::new();
        for row in rows {
            let (id, description, completed) =
                row.map_err(|err| SqliteStoreError::Db(err.to_string()))?;
            items.push(item_from_row(id, description, completed)?);
        }
        Ok(items)
    }

    /// Inserts a row and returns the stored item.
    fn insert_row(&self, description: &Description) -> Result<ToDoItem, SqliteStoreError> {
        let mut guard = self.lock()?;
        let tx = guard.transaction().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        tx.execute("INSERT INTO items (description) VALUES (?1)", params![description.as_str()])
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        let raw_id = tx.last_insert_rowid();
        tx.commit().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        let id = item_id_from_sql(raw_id)?;
        Ok(ToDoItem::new(id, description.clone()))
    }

    /// Loads a single row.
    fn fetch_row(&self, id: ItemId) -> Result<Option<ToDoItem>, SqliteStoreError> {
        let guard = self.lock()?;
        fetch_with(&guard, id)
    }

    /// Sets the completion flag on a row.
    fn update_row(&self, id: ItemId, completed: bool) -> Result<ToDoItem, SqliteStoreError> {
        let raw_id = item_id_to_sql(id).ok_or(SqliteStoreError::NotFound(id))?;
        let mut guard = self.lock()?;
        let tx = guard.transaction().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        let changed = tx
            .execute(
                "UPDATE items SET completed = ?1 WHERE id = ?2",
                params![i64::from(completed), raw_id],
            )
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        if changed == 0 {
            return Err(SqliteStoreError::NotFound(id));
        }
        let item = fetch_with(&tx, id)?.ok_or(SqliteStoreError::NotFound(id))?;
        tx.commit().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        Ok(item)
    }

    /// Removes a row.
    fn delete_row(&self, id: ItemId) -> Result<(), SqliteStoreError> {
        let raw_id = item_id_to_sql(id).ok_or(SqliteStoreError::NotFound(id))?;
        let mut guard = self.lock()?;
        let tx = guard.transaction().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        let changed = tx
            .execute("DELETE FROM items WHERE id = ?1", params![raw_id])
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        if changed == 0 {
            return Err(SqliteStoreError::NotFound(id));
        }
        tx.commit().map_err(|err| SqliteStoreError::Db(err.to_string()))
    }
}

impl ItemStore for SqliteItemStore {
    fn list(&self) -> Result<Vec<ToDoItem>, StoreError> {
        self.list_rows().map_err(StoreError::from)
    }

    fn create(&self, description: &Description) -> Result<ToDoItem, StoreError> {
        self.insert_row(description).map_err(StoreError::from)
    }

    fn get(&self, id: ItemId) -> Result<Option<ToDoItem>, StoreError> {
        self.fetch_row(id).map_err(StoreError::from)
    }

    fn update(&self, id: ItemId, completed: bool) -> Result<ToDoItem, StoreError> {
        self.update_row(id, completed).map_err(StoreError::from)
    }

    fn delete(&self, id: ItemId) -> Result<(), StoreError> {
        self.delete_row(id).map_err(StoreError::from)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Creates the `items` table.
fn initialize_schema(connection: &mut Connection) -> Result<(), SqliteStoreError> {
    let tx = connection.transaction().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    tx.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            description TEXT NOT NULL
                CHECK (length(CAST(description AS BLOB)) BETWEEN 1 AND {MAX_DESCRIPTION_BYTES}),
            completed INTEGER NOT NULL DEFAULT 0 CHECK (completed IN (0, 1))
        );"
    ))
    .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    tx.commit().map_err(|err| SqliteStoreError::Db(err.to_string()))
}

/// Loads a single row through any connection or transaction.
fn fetch_with(connection: &Connection, id: ItemId) -> Result<Option<ToDoItem>, SqliteStoreError> {
    let Some(raw_id) = item_id_to_sql(id) else {
        return Ok(None);
    };
    let row: Option<(i64, String, i64)> = connection
        .query_row(
            "SELECT id, description, completed FROM items WHERE id = ?1",
            params![raw_id],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .optional()
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    row.map(|(raw_id, description, completed)| item_from_row(raw_id, description, completed))
        .transpose()
}

/// Rebuilds a validated item from stored columns.
fn item_from_row(
    raw_id: i64,
    description: String,
    completed: i64,
) -> Result<ToDoItem, SqliteStoreError> {
    let id = item_id_from_sql(raw_id)?;
    let description = Description::parse(description)
        .map_err(|err| SqliteStoreError::Invalid(format!("item {id}: {err}")))?;
    let completed = match completed {
        0 => false,
        1 => true,
        other => {
            return Err(SqliteStoreError::Invalid(format!(
                "item {id}: completed flag out of range: {other}"
            )));
        }
    };
    Ok(ToDoItem {
        id,
        description,
        completed,
    })
}

/// Converts a stored row id into an item identifier.
fn item_id_from_sql(raw_id: i64) -> Result<ItemId, SqliteStoreError> {
    u64::try_from(raw_id)
        .ok()
        .and_then(ItemId::from_raw)
        .ok_or_else(|| SqliteStoreError::Invalid(format!("invalid item id: {raw_id}")))
}

/// Converts an item identifier into a row id.
///
/// Returns `None` above `i64::MAX`; no stored row can carry such an id.
fn item_id_to_sql(id: ItemId) -> Option<i64> {
    i64::try_from(id.get()).ok()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
