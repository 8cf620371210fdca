//! Libris Store - SQLite ledger for the lending library
//!
//! Provides:
//! - Connection setup from an explicit [`config::StoreConfig`]
//! - Embedded migrations with checksums
//! - Row-level repository functions used inside engine transactions
//! - Translation of SQLite failures into `ExError`

pub mod config;
pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

pub use config::{DatabaseLocation, StoreConfig};
pub use errors::Result;
pub use repo::SqliteRepo;
