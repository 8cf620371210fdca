//! Libris Core - domain model and rules of the lending library
//!
//! - Book, Reader, BorrowRecord and User models, referencing each other by id
//! - Pure borrowing rules (stock, per-reader limit, duplicate loans, deletion)
//! - Input validation for catalogue writes
//! - The error facility shared by store and engine
//! - The structured logging facility

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod rules;

pub use errors::{ErrorCategory, ExError, ExErrorKind, LibraryError, Result};
pub use libris_core_types::schema;
pub use model::{Book, BorrowRecord, Reader, ReaderView, User};
