//! Core types shared across modelzoo facilities
//!
//! - **Correlation types**: `RequestId` attached to every engine command
//! - **Schema constants**: canonical field keys and event names for
//!   structured logging

pub mod correlation;
pub mod schema;

pub use correlation::RequestId;
