//! Read-only query facade
//!
//! Loans are never reached through a reader object; they are fetched here by
//! explicit query and assembled into a [`ReaderView`].

use libris_core::errors::LibraryError;
use libris_core::model::{Book, BookId, ReaderId, ReaderView, User, UserId};
use libris_core::{log_op_end, log_op_error, log_op_start};
use libris_core_types::RequestContext;
use libris_store::errors::{from_rusqlite, Result};
use libris_store::repo::SqliteRepo;
use rusqlite::Connection;

use super::in_context;

/// A reader with their loans, ordered by `(borrow_date, id)`
///
/// With `include_history` false only active loans are included.
///
/// # Errors
/// `NotFound` if the reader does not exist.
pub fn get_reader_detail(
    conn: &Connection,
    ctx: &RequestContext,
    reader_id: ReaderId,
    include_history: bool,
) -> Result<ReaderView> {
    log_op_start!(
        "get_reader_detail",
        request_id = ctx.request_id.as_str(),
        reader_id
    );
    let start = std::time::Instant::now();

    let view = get_reader_detail_impl(conn, reader_id, include_history).map_err(|e| {
        let e = in_context(e, "get_reader_detail", ctx);
        log_op_error!(
            "get_reader_detail",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = ctx.request_id.as_str()
        );
        e
    })?;

    log_op_end!(
        "get_reader_detail",
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = ctx.request_id.as_str(),
        active_loans = view.active_loans().count() as u64
    );
    Ok(view)
}

fn get_reader_detail_impl(
    conn: &Connection,
    reader_id: ReaderId,
    include_history: bool,
) -> Result<ReaderView> {
    // One read transaction so the reader row and its loans share a snapshot
    let tx = conn.unchecked_transaction().map_err(from_rusqlite)?;
    let reader =
        SqliteRepo::get_reader(&tx, reader_id)?.ok_or(LibraryError::ReaderNotFound { reader_id })?;
    let loans = SqliteRepo::loans_for_reader(&tx, reader_id, include_history)?;
    tx.commit().map_err(from_rusqlite)?;
    Ok(ReaderView::new(reader, loans))
}

/// # Errors
/// `NotFound` if the book does not exist.
pub fn get_book(conn: &Connection, ctx: &RequestContext, book_id: BookId) -> Result<Book> {
    log_op_start!("get_book", request_id = ctx.request_id.as_str(), book_id);
    let start = std::time::Instant::now();

    let book = SqliteRepo::get_book(conn, book_id)
        .and_then(|found| found.ok_or_else(|| LibraryError::BookNotFound { book_id }.into()))
        .map_err(|e| {
            let e = in_context(e, "get_book", ctx);
            log_op_error!(
                "get_book",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                request_id = ctx.request_id.as_str()
            );
            e
        })?;

    log_op_end!(
        "get_book",
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = ctx.request_id.as_str()
    );
    Ok(book)
}

/// # Errors
/// `NotFound` if the user does not exist.
pub fn get_user(conn: &Connection, ctx: &RequestContext, user_id: UserId) -> Result<User> {
    log_op_start!(
        "get_user",
        request_id = ctx.request_id.as_str(),
        librarian_id = user_id
    );
    let start = std::time::Instant::now();

    let user = SqliteRepo::get_user(conn, user_id)
        .and_then(|found| found.ok_or_else(|| LibraryError::UserNotFound { user_id }.into()))
        .map_err(|e| {
            let e = in_context(e, "get_user", ctx);
            log_op_error!(
                "get_user",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                request_id = ctx.request_id.as_str()
            );
            e
        })?;

    log_op_end!(
        "get_user",
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = ctx.request_id.as_str()
    );
    Ok(user)
}

/// Look a librarian up by login email
///
/// # Errors
/// `NotFound` if no user has this email.
pub fn find_user_by_email(conn: &Connection, ctx: &RequestContext, email: &str) -> Result<User> {
    log_op_start!("find_user_by_email", request_id = ctx.request_id.as_str());
    let start = std::time::Instant::now();

    let user = SqliteRepo::find_user_by_email(conn, email)
        .and_then(|found| {
            found.ok_or_else(|| {
                LibraryError::UserEmailNotFound {
                    email: email.to_string(),
                }
                .into()
            })
        })
        .map_err(|e| {
            let e = in_context(e, "find_user_by_email", ctx);
            log_op_error!(
                "find_user_by_email",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                request_id = ctx.request_id.as_str()
            );
            e
        })?;

    log_op_end!(
        "find_user_by_email",
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = ctx.request_id.as_str(),
        librarian_id = user.id
    );
    Ok(user)
}

/// Number of copies of a book currently out on loan
///
/// For any book, `available_stock + active_loan_count` stays constant across
/// borrows and returns.
///
/// # Errors
/// `NotFound` if the book does not exist.
pub fn active_loan_count(
    conn: &Connection,
    ctx: &RequestContext,
    book_id: BookId,
) -> Result<usize> {
    log_op_start!(
        "active_loan_count",
        request_id = ctx.request_id.as_str(),
        book_id
    );
    let start = std::time::Instant::now();

    let count = active_loan_count_impl(conn, book_id).map_err(|e| {
        let e = in_context(e, "active_loan_count", ctx);
        log_op_error!(
            "active_loan_count",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = ctx.request_id.as_str()
        );
        e
    })?;

    log_op_end!(
        "active_loan_count",
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = ctx.request_id.as_str(),
        active_loans = count as u64
    );
    Ok(count)
}

fn active_loan_count_impl(conn: &Connection, book_id: BookId) -> Result<usize> {
    SqliteRepo::get_book(conn, book_id)?.ok_or(LibraryError::BookNotFound { book_id })?;
    SqliteRepo::count_active_loans_for_book(conn, book_id)
}
