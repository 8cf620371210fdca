//! Repository layer: row-level reads and writes of the lending ledger
//!
//! Functions take `&Connection`; a `rusqlite::Transaction` derefs to one, so
//! the engine calls them inside its own unit of work.

mod rows;
pub mod sqlite_repo;

pub use sqlite_repo::SqliteRepo;
