//! Schema migration command

#![allow(clippy::result_large_err)]

use modelzoo_core::{log_op_end, log_op_error, log_op_start};
use modelzoo_store::errors::Result;
use modelzoo_store::migrations::{applied_migrations, apply_migrations};
use rusqlite::Connection;

/// Apply pending migrations; returns every applied migration id
pub fn migrate(conn: &mut Connection) -> Result<Vec<String>> {
    log_op_start!("migrate");
    let start = std::time::Instant::now();

    let result = apply_migrations(conn)
        .and_then(|()| applied_migrations(conn))
        .map_err(|e| {
            log_op_error!(
                "migrate",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

    log_op_end!(
        "migrate",
        duration_ms = start.elapsed().as_millis() as u64,
        applied = result.len()
    );

    Ok(result)
}
