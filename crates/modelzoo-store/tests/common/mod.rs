#![allow(dead_code)]

use modelzoo_store::db::open_in_memory;
use modelzoo_store::migrations::apply_migrations;
use modelzoo_store::SqliteRepo;
use rusqlite::Connection;

/// In-memory database with foreign keys on and every migration applied
pub fn setup_db() -> Connection {
    let mut conn = open_in_memory().unwrap();
    apply_migrations(&mut conn).unwrap();
    conn
}

/// Create twitter users in order and return their ids
pub fn twitter_users(conn: &Connection, names: &[&str]) -> Vec<i64> {
    names
        .iter()
        .map(|name| SqliteRepo::create_twitter_user(conn, name).unwrap().id)
        .collect()
}

pub fn names<T, F: Fn(&T) -> &str>(items: &[T], name: F) -> Vec<String> {
    items.iter().map(|i| name(i).to_string()).collect()
}
