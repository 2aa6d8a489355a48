//! modelzoo core - relational model definitions and the follow/block edge manager
//!
//! This crate provides:
//! - Model structs for each schema example (abstract base inheritance,
//!   multi-table inheritance, proxy model, foreign keys, typed many-to-many)
//! - Field validation shared by every persistence backend
//! - The `RelationLedger` seam and the follow/block operations written against it
//! - An in-memory social graph `Store`
//! - The canonical error facility and structured logging facility

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod rules;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, ModelError, Result};
pub use model::{Relation, RelationType, TwitterUser};
pub use ops::{Direction, RelationLedger, Store};
