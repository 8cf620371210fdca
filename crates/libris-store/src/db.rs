//! Database connection management

use crate::config::{DatabaseLocation, StoreConfig};
use crate::errors::{from_rusqlite, io_error, Result};
use crate::migrations::apply_migrations;
use rusqlite::Connection;
use std::path::Path;

/// Open a SQLite database at the given path
///
/// # Errors
/// `Persistence` if SQLite cannot open the file.
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database
///
/// # Errors
/// `Persistence` if SQLite cannot allocate the database.
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Apply connection settings: busy timeout, foreign keys, and optionally WAL
///
/// # Errors
/// `Persistence` if a pragma fails.
pub fn configure(conn: &Connection, config: &StoreConfig) -> Result<()> {
    conn.busy_timeout(config.busy_timeout)
        .map_err(from_rusqlite)?;

    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(from_rusqlite)?;

    let file_backed = matches!(config.database, DatabaseLocation::File(_));
    if config.journal_mode_wal && file_backed {
        conn.execute_batch("PRAGMA journal_mode = WAL;")
            .map_err(from_rusqlite)?;
    }

    Ok(())
}

/// Open, configure and migrate the database described by `config`
///
/// Parent directories of a file database are created as needed.
///
/// # Errors
/// `Io` if the parent directory cannot be created; otherwise whatever
/// opening, configuring or migrating reports.
pub fn connect(config: &StoreConfig) -> Result<Connection> {
    let mut conn = match &config.database {
        DatabaseLocation::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| io_error("create_db_dir", e))?;
            }
            open(path)?
        }
        DatabaseLocation::InMemory => open_in_memory()?,
    };

    configure(&conn, config)?;
    apply_migrations(&mut conn)?;

    tracing::debug!(database = ?config.database, "ledger connection ready");
    Ok(conn)
}
