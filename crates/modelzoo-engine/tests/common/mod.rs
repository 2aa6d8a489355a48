#![allow(dead_code)]

use modelzoo_engine::{apply_engine_command, EngineCommand, EngineCommandResult};
use rusqlite::Connection;

/// Migrated in-memory database
pub fn setup_db() -> Connection {
    let mut conn = modelzoo_store::db::open_in_memory().unwrap();
    apply_engine_command(EngineCommand::Migrate, &mut conn).unwrap();
    conn
}

pub fn create_users(conn: &mut Connection, names: &[&str]) -> Vec<i64> {
    names
        .iter()
        .map(|name| {
            match apply_engine_command(
                EngineCommand::UserCreate {
                    name: name.to_string(),
                },
                conn,
            )
            .unwrap()
            {
                EngineCommandResult::User(user) => user.id,
                other => panic!("unexpected result: {:?}", other),
            }
        })
        .collect()
}
