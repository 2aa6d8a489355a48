//! Database connection management
//!
//! Every connection handed out here has foreign keys enforced; the cascade
//! and set-null actions in the schema depend on it.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, io_error, Result};
use rusqlite::Connection;
use std::path::Path;

/// Open (creating if needed) a SQLite database at the given path
///
/// Missing parent directories are created.
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| io_error("db_open", e))?;
        }
    }

    let conn = Connection::open(path).map_err(from_rusqlite)?;
    configure(&conn)?;
    tracing::debug!(path = %path.display(), "opened database");
    Ok(conn)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().map_err(from_rusqlite)?;
    conn.pragma_update(None, "foreign_keys", "ON")
        .map_err(from_rusqlite)?;
    Ok(conn)
}

/// Configure a connection: foreign keys on, WAL journalling
pub fn configure(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", "ON")
        .map_err(from_rusqlite)?;

    // journal_mode answers with the mode actually in effect
    let mode: String = conn
        .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
        .map_err(from_rusqlite)?;
    tracing::debug!(journal_mode = %mode, "configured connection");

    Ok(())
}
