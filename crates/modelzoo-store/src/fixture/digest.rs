//! Fixture digest canonicalization
//!
//! Declaration sections are order-insensitive and get sorted. Relations are
//! replayed in file order, and a reordering can change the outcome (follow
//! then block differs from block then follow), so their order is kept.

#![allow(clippy::result_large_err)]

use crate::fixture::format_v0::FixtureV0;
use modelzoo_core::errors::ModelError;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::errors::Result;

#[derive(Debug, Serialize)]
struct CanonicalFixture {
    schema_version: u32,
    manufacturers: Vec<(String, Vec<String>)>,
    fc_users: Vec<(String, Option<String>)>,
    twitter_users: Vec<String>,
    relations: Vec<(String, String, &'static str)>,
}

/// Compute a stable digest for a fixture
///
/// Returns a SHA-256 hex digest of the canonical JSON form.
pub fn compute_fixture_digest(fixture: &FixtureV0) -> Result<String> {
    let canonical = canonicalize_fixture(fixture);
    let json = serde_json::to_string(&canonical).map_err(ModelError::from)?;

    Ok(hex::encode(Sha256::digest(json.as_bytes())))
}

fn canonicalize_fixture(fixture: &FixtureV0) -> CanonicalFixture {
    let mut manufacturers: Vec<(String, Vec<String>)> = fixture
        .manufacturers
        .iter()
        .map(|m| {
            let mut cars = m.cars.clone();
            cars.sort();
            (m.name.clone(), cars)
        })
        .collect();
    manufacturers.sort();

    let mut fc_users: Vec<(String, Option<String>)> = fixture
        .fc_users
        .iter()
        .map(|u| (u.name.clone(), u.instructor.clone()))
        .collect();
    fc_users.sort();

    let mut twitter_users = fixture.twitter_users.clone();
    twitter_users.sort();

    let relations = fixture
        .relations
        .iter()
        .map(|r| (r.from.clone(), r.to.clone(), r.relation_type.code()))
        .collect();

    CanonicalFixture {
        schema_version: fixture.schema_version,
        manufacturers,
        fc_users,
        twitter_users,
        relations,
    }
}
