//! SQLite repository entry point and shared row helpers

#![allow(clippy::result_large_err)]

use chrono::{DateTime, TimeZone, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension};

use crate::errors::{from_rusqlite, Result};
use modelzoo_core::errors::{ExError, ModelError};

/// SQLite repository for every model group
///
/// Stateless; each method takes the connection (or an open transaction,
/// which derefs to one) it should run against.
pub struct SqliteRepo;

impl SqliteRepo {
    /// Names of the user tables currently in the schema, sorted
    pub fn table_names(conn: &Connection) -> Result<Vec<String>> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .map_err(from_rusqlite)?;
        let names = stmt
            .query_map([], |row| row.get(0))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<String>, _>>()
            .map_err(from_rusqlite)?;
        Ok(names)
    }

    /// Row count of `table`
    ///
    /// `table` is interpolated, so callers pass compile-time names only.
    pub fn count_rows(conn: &Connection, table: &str) -> Result<i64> {
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
            row.get(0)
        })
        .map_err(from_rusqlite)
    }

    /// Whether a row with `id` exists in `table`
    pub(crate) fn exists(conn: &Connection, table: &str, id: i64) -> Result<bool> {
        let found = conn
            .query_row(
                &format!("SELECT 1 FROM {} WHERE id = ?1", table),
                [id],
                |_| Ok(()),
            )
            .optional()
            .map_err(from_rusqlite)?;
        Ok(found.is_some())
    }
}

/// Lookup miss for a row of `model`
pub(crate) fn not_found(model: &str, id: i64) -> ExError {
    ModelError::NotFound {
        model: model.to_string(),
        id,
    }
    .into()
}

/// Stored form of a timestamp: epoch milliseconds
pub(crate) fn to_millis(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

/// Read an epoch-millisecond column back into a timestamp
pub(crate) fn millis_at(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let ms: i64 = row.get(idx)?;
    Utc.timestamp_millis_opt(ms).single().ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Integer,
            format!("timestamp out of range: {}", ms).into(),
        )
    })
}

/// Truncate to the precision the database keeps
pub(crate) fn truncate_millis(at: DateTime<Utc>) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(at.timestamp_millis())
        .single()
        .unwrap_or(at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::apply_migrations;

    #[test]
    fn test_table_names_after_migrations() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();

        let tables = SqliteRepo::table_names(&conn).unwrap();
        for expected in ["students", "restaurants", "fc_users", "relations"] {
            assert!(tables.iter().any(|t| t == expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_millis_truncation() {
        let at = Utc.timestamp_nanos(1_700_000_000_123_456_789);
        assert_eq!(truncate_millis(at).timestamp_millis(), 1_700_000_000_123);
        assert_eq!(truncate_millis(at).timestamp_subsec_nanos(), 123_000_000);
    }
}
