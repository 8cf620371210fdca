//! Canonical field keys and event names for structured logging

pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Entity identifiers
pub const FIELD_BOOK_ID: &str = "book_id";
pub const FIELD_READER_ID: &str = "reader_id";
pub const FIELD_LIBRARIAN_ID: &str = "librarian_id";
pub const FIELD_RECORD_ID: &str = "record_id";

// Ledger state
pub const FIELD_AVAILABLE_STOCK: &str = "available_stock";
pub const FIELD_ACTIVE_LOANS: &str = "active_loans";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
