//! Fixture parser with validation
//!
//! Parses YAML and validates schema version, name uniqueness and that every
//! reference points at a name declared in the same file

#![allow(clippy::result_large_err)]

use crate::errors::{fixture_validation, Result};
use crate::fixture::format_v0::FixtureV0;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Parse a fixture file from a path
pub fn parse_fixture_file(path: &Path) -> Result<FixtureV0> {
    let content = fs::read_to_string(path)
        .map_err(|e| fixture_validation(&format!("Failed to read fixture file: {}", e)))?;

    parse_fixture_str(&content)
}

/// Parse a fixture from a string
pub fn parse_fixture_str(content: &str) -> Result<FixtureV0> {
    let fixture: FixtureV0 = serde_yaml::from_str(content)
        .map_err(|e| fixture_validation(&format!("YAML parse error: {}", e)))?;

    validate_fixture(&fixture)?;

    Ok(fixture)
}

fn validate_fixture(fixture: &FixtureV0) -> Result<()> {
    if fixture.schema_version != 0 {
        return Err(fixture_validation(&format!(
            "Unsupported schema_version: {}. Expected 0",
            fixture.schema_version
        )));
    }

    let mut fc_names = HashSet::new();
    for user in &fixture.fc_users {
        if !fc_names.insert(user.name.as_str()) {
            return Err(fixture_validation(&format!(
                "Duplicate fc_user name: {}",
                user.name
            )));
        }
    }
    for user in &fixture.fc_users {
        match user.instructor.as_deref() {
            Some(instructor) if instructor == user.name => {
                return Err(fixture_validation(&format!(
                    "fc_user {} cannot be their own instructor",
                    user.name
                )));
            }
            Some(instructor) if !fc_names.contains(instructor) => {
                return Err(fixture_validation(&format!(
                    "fc_user {} references undeclared instructor: {}",
                    user.name, instructor
                )));
            }
            _ => {}
        }
    }

    let mut twitter_names = HashSet::new();
    for name in &fixture.twitter_users {
        if !twitter_names.insert(name.as_str()) {
            return Err(fixture_validation(&format!(
                "Duplicate twitter user name: {}",
                name
            )));
        }
    }

    for (index, relation) in fixture.relations.iter().enumerate() {
        for name in [&relation.from, &relation.to] {
            if !twitter_names.contains(name.as_str()) {
                return Err(fixture_validation(&format!(
                    "Relation {} references undeclared twitter user: {}",
                    index, name
                )));
            }
        }
        if relation.from == relation.to {
            return Err(fixture_validation(&format!(
                "Relation {} points {} at itself",
                index, relation.from
            )));
        }
    }

    Ok(())
}
