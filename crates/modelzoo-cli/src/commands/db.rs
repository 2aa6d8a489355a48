//! Database handling shared by every command
//!
//! Usage: modelzoo-cli [--db PATH] migrate

use std::path::Path;

use modelzoo_engine::{apply_engine_command, EngineCommand, EngineCommandResult};
use rusqlite::Connection;

/// Open the database at `path` and bring its schema up to date
pub fn open_store(path: &Path) -> Result<Connection, Box<dyn std::error::Error>> {
    let mut conn = modelzoo_store::db::open(path)?;
    apply_engine_command(EngineCommand::Migrate, &mut conn)?;
    Ok(conn)
}

/// Execute migrate
pub fn execute_migrate(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = modelzoo_store::db::open(path)?;

    match apply_engine_command(EngineCommand::Migrate, &mut conn)? {
        EngineCommandResult::Migrated(ids) => {
            for id in &ids {
                println!("{}", id);
            }
            println!("✓ Schema up to date ({} migrations)", ids.len());
            Ok(())
        }
        other => Err(format!("unexpected engine result: {:?}", other).into()),
    }
}
