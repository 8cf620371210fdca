pub mod book;
pub mod loan;
pub mod reader;
pub mod user;

use libris_store::{db, DatabaseLocation, StoreConfig};
use rusqlite::Connection;
use serde::Serialize;
use std::path::PathBuf;

/// Open the ledger from the environment, with `--db` taking precedence
pub(crate) fn open_ledger(db_override: Option<PathBuf>) -> anyhow::Result<Connection> {
    let mut config = StoreConfig::from_env()?;
    if let Some(path) = db_override {
        config.database = DatabaseLocation::parse(&path.to_string_lossy());
    }
    Ok(db::connect(&config)?)
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
