//! Fixture import system
//!
//! Provides:
//! - Fixture format v0 schema
//! - YAML parser with validation
//! - Digest canonicalization
//! - Importer that replays relations through the follow/block manager

pub mod digest;
pub mod format_v0;
pub mod importer;
pub mod parser;

pub use digest::compute_fixture_digest;
pub use format_v0::FixtureV0;
pub use importer::{import_fixture, import_fixture_str};
pub use parser::{parse_fixture_file, parse_fixture_str};
