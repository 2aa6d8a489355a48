//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names identical across every crate that logs.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Entity identifiers
pub const FIELD_USER_ID: &str = "user_id";
pub const FIELD_FROM_USER_ID: &str = "from_user_id";
pub const FIELD_TO_USER_ID: &str = "to_user_id";
pub const FIELD_RELATION_ID: &str = "relation_id";
pub const FIELD_RELATION_TYPE: &str = "relation_type";
pub const FIELD_CREATED: &str = "created";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
