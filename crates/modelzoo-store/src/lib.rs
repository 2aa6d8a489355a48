//! modelzoo store - SQLite persistence for the model zoo
//!
//! Provides:
//! - SQLite schema with an embedded, checksummed migrations framework
//! - Row mapping for every model group (abstract base, inheritance,
//!   foreign keys, social graph)
//! - `SqliteLedger`, the SQLite backend for the follow/block edge manager
//! - YAML fixture parser and importer

pub mod db;
pub mod errors;
pub mod fixture;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use errors::Result;
pub use repo::{SqliteLedger, SqliteRepo};
