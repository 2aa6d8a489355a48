//! Fixture import command

#![allow(clippy::result_large_err)]

use std::path::Path;

use modelzoo_core::{log_op_end, log_op_error, log_op_start};
use modelzoo_store::errors::Result;
use modelzoo_store::fixture::import_fixture;
use rusqlite::Connection;

/// Import a YAML fixture; returns its digest
///
/// The store applies the whole file in one transaction, so a failure leaves
/// the database as it was.
pub fn fixture_import(path: &Path, conn: &mut Connection) -> Result<String> {
    log_op_start!("fixture_import", path = %path.display());
    let start = std::time::Instant::now();

    let digest = import_fixture(path, conn).map_err(|e| {
        log_op_error!(
            "fixture_import",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "fixture_import",
        duration_ms = start.elapsed().as_millis() as u64,
        digest = %digest
    );

    Ok(digest)
}
