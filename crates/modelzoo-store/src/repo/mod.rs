//! Repository layer for persisting domain models to SQLite
//!
//! `SqliteRepo` is split by model group; every file adds an `impl SqliteRepo`
//! block. `SqliteLedger` adapts a connection to the edge manager's
//! `RelationLedger` seam.

mod abstract_base;
mod foreignkey;
mod inheritance;
mod social;
pub mod sqlite_repo;

pub use social::SqliteLedger;
pub use sqlite_repo::SqliteRepo;
