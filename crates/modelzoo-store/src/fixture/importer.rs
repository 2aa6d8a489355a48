//! Fixture importer orchestration
//!
//! Rows are matched by name and created only when missing, so importing the
//! same fixture twice leaves the database unchanged. Relations go through the
//! follow/block manager rather than raw inserts.

#![allow(clippy::result_large_err)]

use std::collections::HashMap;
use std::path::Path;

use modelzoo_core::model::RelationType;
use modelzoo_core::ops::{block, follow};
use rusqlite::{Connection, Transaction};

use crate::errors::{from_rusqlite, Result};
use crate::fixture::format_v0::FixtureV0;
use crate::fixture::{compute_fixture_digest, parse_fixture_file, parse_fixture_str};
use crate::repo::{SqliteLedger, SqliteRepo};

/// Import a fixture file into the database
///
/// This is the main entry point for fixture import. It:
/// 1. Parses and validates the fixture YAML
/// 2. Computes the fixture digest
/// 3. Applies every section inside one transaction
///
/// Returns the fixture digest on success
pub fn import_fixture(path: &Path, conn: &mut Connection) -> Result<String> {
    let fixture = parse_fixture_file(path)?;
    apply_fixture(&fixture, conn)
}

/// Import fixture YAML held in memory
pub fn import_fixture_str(content: &str, conn: &mut Connection) -> Result<String> {
    let fixture = parse_fixture_str(content)?;
    apply_fixture(&fixture, conn)
}

fn apply_fixture(fixture: &FixtureV0, conn: &mut Connection) -> Result<String> {
    let digest = compute_fixture_digest(fixture)?;

    let tx = conn.transaction().map_err(from_rusqlite)?;

    import_manufacturers(&tx, fixture)?;
    import_fc_users(&tx, fixture)?;
    import_social(&tx, fixture)?;

    tx.commit().map_err(from_rusqlite)?;
    tracing::debug!(digest = %digest, "fixture imported");

    Ok(digest)
}

fn import_manufacturers(tx: &Transaction, fixture: &FixtureV0) -> Result<()> {
    for entry in &fixture.manufacturers {
        let manufacturer = match SqliteRepo::find_manufacturer_by_name(tx, &entry.name)? {
            Some(existing) => existing,
            None => SqliteRepo::create_manufacturer(tx, &entry.name)?,
        };

        for car in &entry.cars {
            if SqliteRepo::find_car_by_name(tx, manufacturer.id, car)?.is_none() {
                SqliteRepo::create_car(tx, manufacturer.id, car)?;
            }
        }
    }
    Ok(())
}

/// Users first, instructor links second, so an instructor may be declared
/// after their students
fn import_fc_users(tx: &Transaction, fixture: &FixtureV0) -> Result<()> {
    let mut ids = HashMap::new();
    for entry in &fixture.fc_users {
        let user = match SqliteRepo::find_fc_user_by_name(tx, &entry.name)? {
            Some(existing) => existing,
            None => SqliteRepo::create_fc_user(tx, &entry.name, None)?,
        };
        ids.insert(entry.name.as_str(), user.id);
    }

    for entry in &fixture.fc_users {
        if let (Some(&user_id), Some(instructor)) =
            (ids.get(entry.name.as_str()), entry.instructor.as_deref())
        {
            let instructor_id = ids.get(instructor).copied();
            SqliteRepo::set_instructor(tx, user_id, instructor_id)?;
        }
    }
    Ok(())
}

fn import_social(tx: &Transaction, fixture: &FixtureV0) -> Result<()> {
    let mut ids = HashMap::new();
    for name in &fixture.twitter_users {
        let user = match SqliteRepo::find_twitter_user_by_name(tx, name)? {
            Some(existing) => existing,
            None => SqliteRepo::create_twitter_user(tx, name)?,
        };
        ids.insert(name.as_str(), user.id);
    }

    let mut ledger = SqliteLedger::new(tx);
    for relation in &fixture.relations {
        // Both names were checked against twitter_users by the parser
        let (Some(&actor), Some(&target)) =
            (ids.get(relation.from.as_str()), ids.get(relation.to.as_str()))
        else {
            continue;
        };

        match relation.relation_type {
            RelationType::Follow => {
                follow(&mut ledger, actor, target)?;
            }
            RelationType::Block => {
                block(&mut ledger, actor, target)?;
            }
        }
    }
    Ok(())
}
