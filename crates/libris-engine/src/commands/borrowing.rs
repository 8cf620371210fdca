//! Borrow and return: the two operations that move stock
//!
//! Each runs inside one `BEGIN IMMEDIATE` transaction, so existence checks,
//! rule checks, the record write and the stock write are a single atomic step
//! that no other connection can interleave with.

use libris_core::errors::LibraryError;
use libris_core::model::{BookId, BorrowRecord, ReaderId, UserId};
use libris_core::rules::{check_borrow, select_loan_to_return};
use libris_core::{log_op_end, log_op_error, log_op_start};
use libris_core_types::RequestContext;
use libris_store::errors::{from_rusqlite, Result};
use libris_store::repo::SqliteRepo;
use rusqlite::Connection;

use super::{begin_unit_of_work, in_context, now};

/// Lend one copy of a book to a reader
///
/// Checks run in order: book, reader and librarian exist; a copy is on the
/// shelf; the reader is under the loan limit; the reader does not already
/// hold this book.
///
/// # Errors
/// - `NotFound` for a missing book, reader or librarian
/// - `NoCopiesAvailable`, `BorrowLimitReached`, `AlreadyBorrowed`
/// - `Concurrency` if the write lock could not be taken in time
/// - `Persistence` on any other store failure
pub fn borrow_book(
    conn: &mut Connection,
    ctx: &RequestContext,
    book_id: BookId,
    reader_id: ReaderId,
    librarian_id: UserId,
) -> Result<BorrowRecord> {
    log_op_start!(
        "borrow_book",
        request_id = ctx.request_id.as_str(),
        book_id,
        reader_id,
        librarian_id
    );
    let start = std::time::Instant::now();

    let record = borrow_book_impl(conn, book_id, reader_id, librarian_id).map_err(|e| {
        let e = in_context(e, "borrow_book", ctx);
        log_op_error!(
            "borrow_book",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = ctx.request_id.as_str()
        );
        e
    })?;

    log_op_end!(
        "borrow_book",
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = ctx.request_id.as_str(),
        record_id = record.id
    );

    Ok(record)
}

fn borrow_book_impl(
    conn: &mut Connection,
    book_id: BookId,
    reader_id: ReaderId,
    librarian_id: UserId,
) -> Result<BorrowRecord> {
    let tx = begin_unit_of_work(conn)?;

    let mut book =
        SqliteRepo::get_book(&tx, book_id)?.ok_or(LibraryError::BookNotFound { book_id })?;
    let reader =
        SqliteRepo::get_reader(&tx, reader_id)?.ok_or(LibraryError::ReaderNotFound { reader_id })?;
    SqliteRepo::get_user(&tx, librarian_id)?.ok_or(LibraryError::UserNotFound {
        user_id: librarian_id,
    })?;

    let loans = SqliteRepo::active_records_for_reader(&tx, reader_id)?;
    check_borrow(&book, &reader, &loans)?;

    book.take_copy()?;
    let record = SqliteRepo::insert_borrow_record(&tx, book_id, reader_id, librarian_id, now())?;
    SqliteRepo::set_book_stock(&tx, book_id, book.available_stock)?;

    tx.commit().map_err(from_rusqlite)?;

    tracing::debug!(
        book_id,
        reader_id,
        available_stock = book.available_stock,
        "copy lent"
    );
    Ok(record)
}

/// Take a lent copy back
///
/// Closes the reader's active record for this book (the oldest, should the
/// ledger ever hold more than one) and puts the copy back on the shelf. The
/// returning librarian replaces `librarian_id`; `issued_by` is kept.
///
/// # Errors
/// - `NotFound` for a missing book, reader or librarian
/// - `NotBorrowed` if the reader holds no active loan of this book
/// - `Concurrency` if the write lock could not be taken in time
/// - `Persistence` on any other store failure
pub fn return_book(
    conn: &mut Connection,
    ctx: &RequestContext,
    book_id: BookId,
    reader_id: ReaderId,
    librarian_id: UserId,
) -> Result<BorrowRecord> {
    log_op_start!(
        "return_book",
        request_id = ctx.request_id.as_str(),
        book_id,
        reader_id,
        librarian_id
    );
    let start = std::time::Instant::now();

    let record = return_book_impl(conn, book_id, reader_id, librarian_id).map_err(|e| {
        let e = in_context(e, "return_book", ctx);
        log_op_error!(
            "return_book",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = ctx.request_id.as_str()
        );
        e
    })?;

    log_op_end!(
        "return_book",
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = ctx.request_id.as_str(),
        record_id = record.id
    );

    Ok(record)
}

fn return_book_impl(
    conn: &mut Connection,
    book_id: BookId,
    reader_id: ReaderId,
    librarian_id: UserId,
) -> Result<BorrowRecord> {
    let tx = begin_unit_of_work(conn)?;

    let mut book =
        SqliteRepo::get_book(&tx, book_id)?.ok_or(LibraryError::BookNotFound { book_id })?;
    SqliteRepo::get_reader(&tx, reader_id)?.ok_or(LibraryError::ReaderNotFound { reader_id })?;
    SqliteRepo::get_user(&tx, librarian_id)?.ok_or(LibraryError::UserNotFound {
        user_id: librarian_id,
    })?;

    let candidates = SqliteRepo::active_records_for_pair(&tx, book_id, reader_id)?;
    let mut record = select_loan_to_return(book_id, reader_id, &candidates)?.clone();

    record.mark_returned(librarian_id, now())?;
    book.restore_copy()?;
    SqliteRepo::save_return(&tx, &record)?;
    SqliteRepo::set_book_stock(&tx, book_id, book.available_stock)?;

    tx.commit().map_err(from_rusqlite)?;

    tracing::debug!(
        book_id,
        reader_id,
        available_stock = book.available_stock,
        "copy returned"
    );
    Ok(record)
}
