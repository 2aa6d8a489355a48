//! Fixture format v0 schema
//!
//! Rows refer to each other by name, never by id, so the same file can be
//! loaded into any database.

use modelzoo_core::model::RelationType;
use serde::{Deserialize, Serialize};

/// Top-level fixture file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureV0 {
    /// Schema version (must be 0 for this format)
    pub schema_version: u32,

    #[serde(default)]
    pub manufacturers: Vec<FixtureManufacturer>,

    #[serde(default)]
    pub fc_users: Vec<FixtureFcUser>,

    /// Twitter user names; unique within the file
    #[serde(default)]
    pub twitter_users: Vec<String>,

    /// Applied in file order
    #[serde(default)]
    pub relations: Vec<FixtureRelation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureManufacturer {
    pub name: String,

    /// Car names
    #[serde(default)]
    pub cars: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureFcUser {
    pub name: String,

    /// Name of another fc user in the same file
    #[serde(default)]
    pub instructor: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureRelation {
    /// Actor name
    pub from: String,

    /// Target name
    pub to: String,

    /// `follow` or `block`
    #[serde(rename = "type")]
    pub relation_type: RelationType,
}
