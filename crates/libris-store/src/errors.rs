//! Error handling for libris-store
//!
//! Wraps libris-core `ExError` with store-specific helpers. Every rusqlite
//! failure is translated here and nowhere else.

use libris_core::errors::{ExError, ExErrorKind};
use rusqlite::ErrorCode;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::ConstraintViolation)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

pub fn config_error(key: &str, reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("config")
        .with_message(format!("Invalid value for {}: {}", key, reason.into()))
}

pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// A stored value that no longer decodes into the domain model
pub fn corrupt_row(what: &str, detail: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op("sqlite_decode")
        .with_message(format!("Corrupt {} row: {}", what, detail.into()))
}

/// Translate a rusqlite error into the structured error
///
/// - unique / primary key violation -> `AlreadyExists`
/// - foreign key or check violation -> `ConstraintViolation`
/// - busy / locked -> `Concurrency`
/// - anything else -> `Persistence`
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    let kind = match &err {
        rusqlite::Error::SqliteFailure(failure, _) => match failure.code {
            ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => ExErrorKind::Concurrency,
            ErrorCode::ConstraintViolation => match failure.extended_code {
                rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY => ExErrorKind::AlreadyExists,
                _ => ExErrorKind::ConstraintViolation,
            },
            _ => ExErrorKind::Persistence,
        },
        _ => ExErrorKind::Persistence,
    };

    ExError::new(kind)
        .with_op("sqlite")
        .with_message(err.to_string())
}
