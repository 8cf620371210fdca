//! Catalogue maintenance: books, readers and librarian accounts
//!
//! Inputs are validated before touching the store. Duplicate emails and
//! ISBNs surface from the unique indexes as `AlreadyExists`.

use libris_core::errors::LibraryError;
use libris_core::model::{
    Book, BookId, BookPatch, NewBook, NewReader, NewUser, Reader, ReaderId, ReaderPatch, User,
    UserId, UserPatch,
};
use libris_core::rules::validation::{
    validate_book_patch, validate_new_book, validate_new_reader, validate_new_user,
    validate_reader_patch, validate_user_patch,
};
use libris_core::{log_op_end, log_op_error, log_op_start};
use libris_core_types::RequestContext;
use libris_store::errors::{from_rusqlite, Result};
use libris_store::repo::SqliteRepo;
use rusqlite::Connection;

use super::{begin_unit_of_work, in_context, now};

/// # Errors
/// `InvalidInput` for bad fields, `AlreadyExists` for a duplicate ISBN.
pub fn create_book(conn: &Connection, ctx: &RequestContext, new_book: NewBook) -> Result<Book> {
    log_op_start!("create_book", request_id = ctx.request_id.as_str());
    let start = std::time::Instant::now();

    let result = create_book_impl(conn, &new_book).map_err(|e| {
        let e = in_context(e, "create_book", ctx);
        log_op_error!(
            "create_book",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = ctx.request_id.as_str()
        );
        e
    })?;

    log_op_end!(
        "create_book",
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = ctx.request_id.as_str(),
        book_id = result.id
    );
    Ok(result)
}

fn create_book_impl(conn: &Connection, new_book: &NewBook) -> Result<Book> {
    validate_new_book(new_book)?;
    SqliteRepo::insert_book(conn, new_book)
}

/// Apply the set fields of `patch` to a book
///
/// Setting `available_stock` directly is an administrative correction; it
/// must stay non-negative.
///
/// # Errors
/// `NotFound`, `InvalidInput`, or `AlreadyExists` for a duplicate ISBN.
pub fn update_book(
    conn: &mut Connection,
    ctx: &RequestContext,
    book_id: BookId,
    patch: BookPatch,
) -> Result<Book> {
    log_op_start!(
        "update_book",
        request_id = ctx.request_id.as_str(),
        book_id
    );
    let start = std::time::Instant::now();

    let result = update_book_impl(conn, book_id, patch).map_err(|e| {
        let e = in_context(e, "update_book", ctx);
        log_op_error!(
            "update_book",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = ctx.request_id.as_str()
        );
        e
    })?;

    log_op_end!(
        "update_book",
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = ctx.request_id.as_str()
    );
    Ok(result)
}

fn update_book_impl(conn: &mut Connection, book_id: BookId, patch: BookPatch) -> Result<Book> {
    validate_book_patch(&patch)?;

    let tx = begin_unit_of_work(conn)?;
    let mut book =
        SqliteRepo::get_book(&tx, book_id)?.ok_or(LibraryError::BookNotFound { book_id })?;

    if !patch.is_empty() {
        patch.apply(&mut book);
        SqliteRepo::update_book(&tx, &book)?;
    }

    tx.commit().map_err(from_rusqlite)?;
    Ok(book)
}

/// # Errors
/// `InvalidInput` for bad fields, `AlreadyExists` for a duplicate email.
pub fn create_reader(
    conn: &Connection,
    ctx: &RequestContext,
    new_reader: NewReader,
) -> Result<Reader> {
    log_op_start!("create_reader", request_id = ctx.request_id.as_str());
    let start = std::time::Instant::now();

    let result = create_reader_impl(conn, &new_reader).map_err(|e| {
        let e = in_context(e, "create_reader", ctx);
        log_op_error!(
            "create_reader",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = ctx.request_id.as_str()
        );
        e
    })?;

    log_op_end!(
        "create_reader",
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = ctx.request_id.as_str(),
        reader_id = result.id
    );
    Ok(result)
}

fn create_reader_impl(conn: &Connection, new_reader: &NewReader) -> Result<Reader> {
    validate_new_reader(new_reader)?;
    SqliteRepo::insert_reader(conn, new_reader, now())
}

/// # Errors
/// `NotFound`, `InvalidInput`, or `AlreadyExists` for a duplicate email.
pub fn update_reader(
    conn: &mut Connection,
    ctx: &RequestContext,
    reader_id: ReaderId,
    patch: ReaderPatch,
) -> Result<Reader> {
    log_op_start!(
        "update_reader",
        request_id = ctx.request_id.as_str(),
        reader_id
    );
    let start = std::time::Instant::now();

    let result = update_reader_impl(conn, reader_id, patch).map_err(|e| {
        let e = in_context(e, "update_reader", ctx);
        log_op_error!(
            "update_reader",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = ctx.request_id.as_str()
        );
        e
    })?;

    log_op_end!(
        "update_reader",
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = ctx.request_id.as_str()
    );
    Ok(result)
}

fn update_reader_impl(
    conn: &mut Connection,
    reader_id: ReaderId,
    patch: ReaderPatch,
) -> Result<Reader> {
    validate_reader_patch(&patch)?;

    let tx = begin_unit_of_work(conn)?;
    let mut reader =
        SqliteRepo::get_reader(&tx, reader_id)?.ok_or(LibraryError::ReaderNotFound { reader_id })?;

    if !patch.is_empty() {
        patch.apply(&mut reader);
        SqliteRepo::update_reader(&tx, &reader)?;
    }

    tx.commit().map_err(from_rusqlite)?;
    Ok(reader)
}

/// Store a librarian account
///
/// The password hash arrives already computed by the authentication layer.
///
/// # Errors
/// `InvalidInput` for bad fields, `AlreadyExists` for a duplicate email.
pub fn register_user(conn: &Connection, ctx: &RequestContext, new_user: NewUser) -> Result<User> {
    log_op_start!("register_user", request_id = ctx.request_id.as_str());
    let start = std::time::Instant::now();

    let result = register_user_impl(conn, &new_user).map_err(|e| {
        let e = in_context(e, "register_user", ctx);
        log_op_error!(
            "register_user",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = ctx.request_id.as_str()
        );
        e
    })?;

    log_op_end!(
        "register_user",
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = ctx.request_id.as_str(),
        librarian_id = result.id
    );
    Ok(result)
}

fn register_user_impl(conn: &Connection, new_user: &NewUser) -> Result<User> {
    validate_new_user(new_user)?;
    SqliteRepo::insert_user(conn, new_user, now())
}

/// # Errors
/// `NotFound`, `InvalidInput`, or `AlreadyExists` for a duplicate email.
pub fn update_user(
    conn: &mut Connection,
    ctx: &RequestContext,
    user_id: UserId,
    patch: UserPatch,
) -> Result<User> {
    log_op_start!(
        "update_user",
        request_id = ctx.request_id.as_str(),
        librarian_id = user_id
    );
    let start = std::time::Instant::now();

    let result = update_user_impl(conn, user_id, patch).map_err(|e| {
        let e = in_context(e, "update_user", ctx);
        log_op_error!(
            "update_user",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = ctx.request_id.as_str()
        );
        e
    })?;

    log_op_end!(
        "update_user",
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = ctx.request_id.as_str()
    );
    Ok(result)
}

fn update_user_impl(conn: &mut Connection, user_id: UserId, patch: UserPatch) -> Result<User> {
    validate_user_patch(&patch)?;

    let tx = begin_unit_of_work(conn)?;
    let mut user =
        SqliteRepo::get_user(&tx, user_id)?.ok_or(LibraryError::UserNotFound { user_id })?;

    if !patch.is_empty() {
        patch.apply(&mut user);
        SqliteRepo::update_user(&tx, &user)?;
    }

    tx.commit().map_err(from_rusqlite)?;
    Ok(user)
}
