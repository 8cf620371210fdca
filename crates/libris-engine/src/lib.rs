//! Libris Engine - Orchestration layer
//!
//! Runs each library operation as one unit of work against the ledger:
//! loads what the rules need, asks the rules, writes, and commits. Owns the
//! start/end logging of every operation.

pub mod commands;

pub use commands::engine_command::{apply_engine_command, EngineCommand, EngineCommandResult};
pub use commands::engine_query::{apply_engine_query, EngineQuery, EngineQueryResult};
