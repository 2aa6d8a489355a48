//! Command orchestration layer.
//!
//! ## Logging Ownership
//!
//! Commands here emit `log_op_start!` / `log_op_end!` / `log_op_error!`.
//! Store and core code below them log with `tracing::debug!` only.

pub mod engine_command;
pub mod fixture;
pub mod schema;
pub mod social;
