//! Row decoding and timestamp encoding

use chrono::{DateTime, TimeZone, Utc};
use libris_core::model::{Book, BorrowRecord, LoanView, Reader, User};
use libris_core_types::Sensitive;
use rusqlite::types::Type;
use rusqlite::Row;

pub(crate) const BOOK_COLUMNS: &str =
    "id, title, release_year, authors, description, isbn, available_stock";

pub(crate) const READER_COLUMNS: &str = "id, name, email, created_at";

pub(crate) const USER_COLUMNS: &str = "id, name, email, password_hash, registered_at";

pub(crate) const RECORD_COLUMNS: &str =
    "id, book_id, reader_id, borrow_date, returned, return_date, librarian_id, issued_by";

pub(crate) fn to_millis(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

fn from_millis(idx: usize, millis: i64) -> rusqlite::Result<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single().ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Integer,
            format!("timestamp out of range: {}", millis).into(),
        )
    })
}

fn timestamp_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    from_millis(idx, row.get(idx)?)
}

fn optional_timestamp_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    row.get::<_, Option<i64>>(idx)?
        .map(|millis| from_millis(idx, millis))
        .transpose()
}

/// Decode a book starting at column `offset`
pub(crate) fn book_at(row: &Row<'_>, offset: usize) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(offset)?,
        title: row.get(offset + 1)?,
        release_year: row.get(offset + 2)?,
        authors: row.get(offset + 3)?,
        description: row.get(offset + 4)?,
        isbn: row.get(offset + 5)?,
        available_stock: row.get(offset + 6)?,
    })
}

pub(crate) fn book(row: &Row<'_>) -> rusqlite::Result<Book> {
    book_at(row, 0)
}

pub(crate) fn reader(row: &Row<'_>) -> rusqlite::Result<Reader> {
    Ok(Reader {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        created_at: timestamp_at(row, 3)?,
    })
}

pub(crate) fn user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        password_hash: Sensitive::new(row.get(3)?),
        registered_at: timestamp_at(row, 4)?,
    })
}

pub(crate) fn record(row: &Row<'_>) -> rusqlite::Result<BorrowRecord> {
    Ok(BorrowRecord {
        id: row.get(0)?,
        book_id: row.get(1)?,
        reader_id: row.get(2)?,
        borrow_date: timestamp_at(row, 3)?,
        returned: row.get(4)?,
        return_date: optional_timestamp_at(row, 5)?,
        librarian_id: row.get(6)?,
        issued_by: row.get(7)?,
    })
}

/// A record's columns followed by its book's columns
pub(crate) fn loan(row: &Row<'_>) -> rusqlite::Result<LoanView> {
    let record = record(row)?;
    let book = book_at(row, 8)?;
    Ok(LoanView::new(record, book))
}
