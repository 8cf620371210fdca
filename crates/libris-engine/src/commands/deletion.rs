//! Guarded deletion of readers and books

use libris_core::errors::{ExErrorKind, LibraryError};
use libris_core::model::{BookId, ReaderId};
use libris_core::rules::{check_book_deletable, check_reader_deletable};
use libris_core::{log_op_end, log_op_error, log_op_start};
use libris_core_types::RequestContext;
use libris_store::errors::{from_rusqlite, Result};
use libris_store::repo::SqliteRepo;
use rusqlite::Connection;

use super::{begin_unit_of_work, in_context};

/// Remove a reader who has nothing on loan
///
/// Returned records are removed with the reader.
///
/// # Errors
/// - `NotFound` if the reader does not exist
/// - `CannotDelete` while any loan is active
pub fn delete_reader(
    conn: &mut Connection,
    ctx: &RequestContext,
    reader_id: ReaderId,
) -> Result<()> {
    log_op_start!(
        "delete_reader",
        request_id = ctx.request_id.as_str(),
        reader_id
    );
    let start = std::time::Instant::now();

    delete_reader_impl(conn, reader_id).map_err(|e| {
        let e = in_context(e, "delete_reader", ctx);
        log_op_error!(
            "delete_reader",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = ctx.request_id.as_str()
        );
        e
    })?;

    log_op_end!(
        "delete_reader",
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = ctx.request_id.as_str()
    );
    Ok(())
}

fn delete_reader_impl(conn: &mut Connection, reader_id: ReaderId) -> Result<()> {
    let tx = begin_unit_of_work(conn)?;

    SqliteRepo::get_reader(&tx, reader_id)?.ok_or(LibraryError::ReaderNotFound { reader_id })?;

    let active_loans = SqliteRepo::count_active_loans_for_reader(&tx, reader_id)?;
    check_reader_deletable(reader_id, active_loans)?;

    SqliteRepo::delete_reader(&tx, reader_id)?;
    tx.commit().map_err(from_rusqlite)?;
    Ok(())
}

/// Remove a book that has never been lent
///
/// # Errors
/// - `NotFound` if the book does not exist
/// - `CannotDelete` if any borrow record, active or historical, references it
pub fn delete_book(conn: &mut Connection, ctx: &RequestContext, book_id: BookId) -> Result<()> {
    log_op_start!(
        "delete_book",
        request_id = ctx.request_id.as_str(),
        book_id
    );
    let start = std::time::Instant::now();

    delete_book_impl(conn, book_id).map_err(|e| {
        let e = in_context(e, "delete_book", ctx);
        log_op_error!(
            "delete_book",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = ctx.request_id.as_str()
        );
        e
    })?;

    log_op_end!(
        "delete_book",
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = ctx.request_id.as_str()
    );
    Ok(())
}

fn delete_book_impl(conn: &mut Connection, book_id: BookId) -> Result<()> {
    let tx = begin_unit_of_work(conn)?;

    SqliteRepo::get_book(&tx, book_id)?.ok_or(LibraryError::BookNotFound { book_id })?;

    let records = SqliteRepo::count_records_for_book(&tx, book_id)?;
    check_book_deletable(book_id, records)?;

    // ON DELETE RESTRICT on borrow_records.book_id backs up the count above
    SqliteRepo::delete_book(&tx, book_id).map_err(|e| {
        if e.kind() == ExErrorKind::ConstraintViolation {
            LibraryError::BookHasBorrowRecords { book_id }.into()
        } else {
            e
        }
    })?;

    tx.commit().map_err(from_rusqlite)?;
    Ok(())
}
