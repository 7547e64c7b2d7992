//! Canonical schema constants for structured logging
//!
//! These constants keep field keys and event names consistent across the
//! tracker boundary and any embedding collaborator.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Domain fields
pub const FIELD_MUTATED: &str = "mutated";
pub const FIELD_PATH: &str = "path";

// Error fields
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
