//! modelzoo engine - Orchestration layer
//!
//! Coordinates the core edge manager and the SQLite store: every command runs
//! in its own transaction and owns the operation's lifecycle logging.

pub mod commands;

pub use commands::engine_command::{apply_engine_command, EngineCommand, EngineCommandResult};
