//! Engine-level read-only query surface.
//!
//! `apply_engine_query` is the single entry point for read-only queries.
//! Unlike `apply_engine_command`, it takes a shared connection and never
//! writes.

use libris_core::model::{Book, BookId, ReaderId, ReaderView, User, UserId};
use libris_core_types::RequestContext;
use libris_store::errors::Result;
use rusqlite::Connection;

use crate::commands::queries;

/// Read-only queries supported by the engine.
#[derive(Debug, Clone)]
pub enum EngineQuery {
    ReaderDetail {
        reader_id: ReaderId,
        include_history: bool,
    },
    GetBook {
        book_id: BookId,
    },
    GetUser {
        user_id: UserId,
    },
    FindUserByEmail {
        email: String,
    },
    ActiveLoanCount {
        book_id: BookId,
    },
}

#[derive(Debug, Clone)]
pub enum EngineQueryResult {
    ReaderDetail(ReaderView),
    Book(Book),
    User(User),
    ActiveLoanCount(usize),
}

/// Apply a read-only engine query.
///
/// # Errors
/// `NotFound` when the requested entity does not exist.
pub fn apply_engine_query(
    query: EngineQuery,
    conn: &Connection,
    ctx: &RequestContext,
) -> Result<EngineQueryResult> {
    match query {
        EngineQuery::ReaderDetail {
            reader_id,
            include_history,
        } => queries::get_reader_detail(conn, ctx, reader_id, include_history)
            .map(EngineQueryResult::ReaderDetail),
        EngineQuery::GetBook { book_id } => {
            queries::get_book(conn, ctx, book_id).map(EngineQueryResult::Book)
        }
        EngineQuery::GetUser { user_id } => {
            queries::get_user(conn, ctx, user_id).map(EngineQueryResult::User)
        }
        EngineQuery::FindUserByEmail { email } => {
            queries::find_user_by_email(conn, ctx, &email).map(EngineQueryResult::User)
        }
        EngineQuery::ActiveLoanCount { book_id } => {
            queries::active_loan_count(conn, ctx, book_id).map(EngineQueryResult::ActiveLoanCount)
        }
    }
}
