//! Migration framework
//!
//! - Embedded SQL, applied in order
//! - Each migration in its own transaction, recorded with a checksum
//! - Idempotent: applied migrations are skipped, edited ones are refused

mod checksums;
mod embedded;
mod runner;

pub use runner::apply_migrations;
