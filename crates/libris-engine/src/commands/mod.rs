//! Command orchestration layer.
//!
//! ## Logging Ownership
//!
//! Every public operation here logs `start`, then `end` or `end_error`.
//! Store and core only use `tracing::debug!()`.

pub mod borrowing;
pub mod catalog;
pub mod deletion;
pub mod engine_command;
pub mod engine_query;
pub mod queries;

use chrono::{DateTime, SubsecRound, Utc};
use libris_core::errors::ExError;
use libris_core_types::RequestContext;
use libris_store::errors::{from_rusqlite, Result};
use rusqlite::{Connection, Transaction, TransactionBehavior};

/// Open a write-locked unit of work
///
/// `BEGIN IMMEDIATE` takes the database write lock before any invariant is
/// read. Other connections wait up to their busy timeout.
pub(crate) fn begin_unit_of_work(conn: &mut Connection) -> Result<Transaction<'_>> {
    conn.transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(from_rusqlite)
}

/// Current time at the precision the ledger stores
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Stamp an error with the operation and request it failed in
pub(crate) fn in_context(err: ExError, op: &str, ctx: &RequestContext) -> ExError {
    let err = err.or_op(op).with_request_id(ctx.request_id.clone());
    match &ctx.trace_id {
        Some(trace_id) => err.with_trace_id(trace_id.clone()),
        None => err,
    }
}
