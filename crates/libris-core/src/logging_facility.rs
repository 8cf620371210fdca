//! Structured logging facility
//!
//! - `init(profile)` installs the subscriber once per process
//! - `log_op_start!`, `log_op_end!`, `log_op_error!` emit boundary events
//! - `test_capture` records events in memory for assertions
//!
//! The engine owns `start`/`end`/`end_error` events for each operation; the
//! store and the rules only emit `tracing::debug!` detail.
//!
//! ```rust
//! use libris_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
