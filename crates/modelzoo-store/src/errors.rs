//! Error handling for modelzoo-store
//!
//! Wraps modelzoo-core ExError with store-specific helpers

use modelzoo_core::errors::{ExError, ExErrorKind, ModelError};
use rusqlite::ErrorCode;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_entity_id(migration_id)
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::IntegrityViolation)
        .with_op("migration_checksum")
        .with_entity_id(migration_id)
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create a fixture validation error
pub fn fixture_validation(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("fixture_parse")
        .with_message(reason.to_string())
}

/// True when SQLite rejected a write on a UNIQUE, FOREIGN KEY, CHECK or
/// NOT NULL constraint
pub fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    let kind = if is_constraint_violation(&err) {
        ExErrorKind::IntegrityViolation
    } else {
        ExErrorKind::Persistence
    };
    ExError::new(kind)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Map a rusqlite error onto the domain error for `table`
///
/// Used where the caller speaks `ModelError` (the `RelationLedger` seam).
pub fn to_model_error(err: rusqlite::Error, table: &str) -> ModelError {
    if is_constraint_violation(&err) {
        ModelError::IntegrityViolation {
            table: table.to_string(),
            detail: err.to_string(),
        }
    } else {
        ModelError::Persistence {
            message: err.to_string(),
        }
    }
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
