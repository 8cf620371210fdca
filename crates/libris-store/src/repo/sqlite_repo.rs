//! SQLite repository for books, readers, users and borrow records

use super::rows::{self, BOOK_COLUMNS, READER_COLUMNS, RECORD_COLUMNS, USER_COLUMNS};
use crate::errors::{corrupt_row, from_rusqlite, Result};
use chrono::{DateTime, Utc};
use libris_core::model::{
    Book, BookId, BorrowRecord, LoanView, NewBook, NewReader, NewUser, Reader, ReaderId, RecordId,
    User, UserId,
};
use rusqlite::{params, Connection, OptionalExtension};

/// Stateless namespace for ledger queries
pub struct SqliteRepo;

impl SqliteRepo {
    // Books

    /// # Errors
    /// `AlreadyExists` on a duplicate ISBN; `ConstraintViolation` on negative stock.
    pub fn insert_book(conn: &Connection, book: &NewBook) -> Result<Book> {
        conn.execute(
            "INSERT INTO books (title, release_year, authors, description, isbn, available_stock)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                book.title,
                book.release_year,
                book.authors,
                book.description,
                book.isbn,
                book.available_stock,
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(Book {
            id: conn.last_insert_rowid(),
            title: book.title.clone(),
            release_year: book.release_year,
            authors: book.authors.clone(),
            description: book.description.clone(),
            isbn: book.isbn.clone(),
            available_stock: book.available_stock,
        })
    }

    /// # Errors
    /// `Persistence` on query failure.
    pub fn get_book(conn: &Connection, book_id: BookId) -> Result<Option<Book>> {
        conn.query_row(
            &format!("SELECT {} FROM books WHERE id = ?1", BOOK_COLUMNS),
            [book_id],
            rows::book,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// Overwrite every mutable column of an existing book
    ///
    /// # Errors
    /// `AlreadyExists` on a duplicate ISBN; `ConstraintViolation` on negative stock.
    pub fn update_book(conn: &Connection, book: &Book) -> Result<()> {
        conn.execute(
            "UPDATE books
             SET title = ?2, release_year = ?3, authors = ?4, description = ?5,
                 isbn = ?6, available_stock = ?7
             WHERE id = ?1",
            params![
                book.id,
                book.title,
                book.release_year,
                book.authors,
                book.description,
                book.isbn,
                book.available_stock,
            ],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    /// # Errors
    /// `ConstraintViolation` if the stock would go negative.
    pub fn set_book_stock(conn: &Connection, book_id: BookId, available_stock: i64) -> Result<()> {
        conn.execute(
            "UPDATE books SET available_stock = ?2 WHERE id = ?1",
            params![book_id, available_stock],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    /// Delete a book row; returns whether a row was removed
    ///
    /// # Errors
    /// `ConstraintViolation` while any borrow record still references the book.
    pub fn delete_book(conn: &Connection, book_id: BookId) -> Result<bool> {
        let removed = conn
            .execute("DELETE FROM books WHERE id = ?1", [book_id])
            .map_err(from_rusqlite)?;
        Ok(removed > 0)
    }

    // Readers

    /// # Errors
    /// `AlreadyExists` on a duplicate email.
    pub fn insert_reader(
        conn: &Connection,
        reader: &NewReader,
        created_at: DateTime<Utc>,
    ) -> Result<Reader> {
        conn.execute(
            "INSERT INTO readers (name, email, created_at) VALUES (?1, ?2, ?3)",
            params![reader.name, reader.email, rows::to_millis(created_at)],
        )
        .map_err(from_rusqlite)?;

        let id = conn.last_insert_rowid();
        Self::get_reader(conn, id)?.ok_or_else(|| corrupt_row("reader", "vanished after insert"))
    }

    /// # Errors
    /// `Persistence` on query failure.
    pub fn get_reader(conn: &Connection, reader_id: ReaderId) -> Result<Option<Reader>> {
        conn.query_row(
            &format!("SELECT {} FROM readers WHERE id = ?1", READER_COLUMNS),
            [reader_id],
            rows::reader,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// # Errors
    /// `AlreadyExists` on a duplicate email.
    pub fn update_reader(conn: &Connection, reader: &Reader) -> Result<()> {
        conn.execute(
            "UPDATE readers SET name = ?2, email = ?3 WHERE id = ?1",
            params![reader.id, reader.name, reader.email],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    /// Delete a reader; its borrow records go with it via `ON DELETE CASCADE`
    ///
    /// # Errors
    /// `Persistence` on query failure.
    pub fn delete_reader(conn: &Connection, reader_id: ReaderId) -> Result<bool> {
        let removed = conn
            .execute("DELETE FROM readers WHERE id = ?1", [reader_id])
            .map_err(from_rusqlite)?;
        Ok(removed > 0)
    }

    // Users

    /// # Errors
    /// `AlreadyExists` on a duplicate email.
    pub fn insert_user(
        conn: &Connection,
        user: &NewUser,
        registered_at: DateTime<Utc>,
    ) -> Result<User> {
        conn.execute(
            "INSERT INTO users (name, email, password_hash, registered_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                user.name,
                user.email,
                user.password_hash.expose(),
                rows::to_millis(registered_at),
            ],
        )
        .map_err(from_rusqlite)?;

        let id = conn.last_insert_rowid();
        Self::get_user(conn, id)?.ok_or_else(|| corrupt_row("user", "vanished after insert"))
    }

    /// # Errors
    /// `Persistence` on query failure.
    pub fn get_user(conn: &Connection, user_id: UserId) -> Result<Option<User>> {
        conn.query_row(
            &format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS),
            [user_id],
            rows::user,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// # Errors
    /// `Persistence` on query failure.
    pub fn find_user_by_email(conn: &Connection, email: &str) -> Result<Option<User>> {
        conn.query_row(
            &format!("SELECT {} FROM users WHERE email = ?1", USER_COLUMNS),
            [email],
            rows::user,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// # Errors
    /// `AlreadyExists` on a duplicate email.
    pub fn update_user(conn: &Connection, user: &User) -> Result<()> {
        conn.execute(
            "UPDATE users SET name = ?2, email = ?3, password_hash = ?4 WHERE id = ?1",
            params![user.id, user.name, user.email, user.password_hash.expose()],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    // Borrow records

    /// Open a loan; `librarian_id` and `issued_by` both start as the issuer
    ///
    /// # Errors
    /// `AlreadyExists` if the pair already has an active loan;
    /// `ConstraintViolation` if a referenced row is missing.
    pub fn insert_borrow_record(
        conn: &Connection,
        book_id: BookId,
        reader_id: ReaderId,
        librarian_id: UserId,
        borrow_date: DateTime<Utc>,
    ) -> Result<BorrowRecord> {
        conn.execute(
            "INSERT INTO borrow_records
                (book_id, reader_id, borrow_date, returned, return_date, librarian_id, issued_by)
             VALUES (?1, ?2, ?3, 0, NULL, ?4, ?4)",
            params![book_id, reader_id, rows::to_millis(borrow_date), librarian_id],
        )
        .map_err(from_rusqlite)?;

        let id = conn.last_insert_rowid();
        Self::get_borrow_record(conn, id)?
            .ok_or_else(|| corrupt_row("borrow_record", "vanished after insert"))
    }

    /// # Errors
    /// `Persistence` on query failure.
    pub fn get_borrow_record(
        conn: &Connection,
        record_id: RecordId,
    ) -> Result<Option<BorrowRecord>> {
        conn.query_row(
            &format!("SELECT {} FROM borrow_records WHERE id = ?1", RECORD_COLUMNS),
            [record_id],
            rows::record,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// Persist the return fields of a record closed in memory
    ///
    /// # Errors
    /// `Persistence` on query failure.
    pub fn save_return(conn: &Connection, record: &BorrowRecord) -> Result<()> {
        conn.execute(
            "UPDATE borrow_records
             SET returned = ?2, return_date = ?3, librarian_id = ?4
             WHERE id = ?1",
            params![
                record.id,
                record.returned,
                record.return_date.map(rows::to_millis),
                record.librarian_id,
            ],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    /// A reader's active loans, oldest first
    ///
    /// # Errors
    /// `Persistence` on query failure.
    pub fn active_records_for_reader(
        conn: &Connection,
        reader_id: ReaderId,
    ) -> Result<Vec<BorrowRecord>> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM borrow_records
                 WHERE reader_id = ?1 AND returned = 0
                 ORDER BY borrow_date, id",
                RECORD_COLUMNS
            ))
            .map_err(from_rusqlite)?;

        let records = stmt
            .query_map([reader_id], rows::record)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(records)
    }

    /// Active loans of one book to one reader, oldest first
    ///
    /// # Errors
    /// `Persistence` on query failure.
    pub fn active_records_for_pair(
        conn: &Connection,
        book_id: BookId,
        reader_id: ReaderId,
    ) -> Result<Vec<BorrowRecord>> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM borrow_records
                 WHERE book_id = ?1 AND reader_id = ?2 AND returned = 0
                 ORDER BY borrow_date, id",
                RECORD_COLUMNS
            ))
            .map_err(from_rusqlite)?;

        let records = stmt
            .query_map(params![book_id, reader_id], rows::record)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(records)
    }

    /// A reader's loans joined with their books, ordered by `(borrow_date, id)`
    ///
    /// With `include_history` false only active loans are returned.
    ///
    /// # Errors
    /// `Persistence` on query failure.
    pub fn loans_for_reader(
        conn: &Connection,
        reader_id: ReaderId,
        include_history: bool,
    ) -> Result<Vec<LoanView>> {
        let mut stmt = conn
            .prepare(
                "SELECT r.id, r.book_id, r.reader_id, r.borrow_date, r.returned, r.return_date,
                        r.librarian_id, r.issued_by,
                        b.id, b.title, b.release_year, b.authors, b.description, b.isbn,
                        b.available_stock
                 FROM borrow_records r
                 JOIN books b ON b.id = r.book_id
                 WHERE r.reader_id = ?1 AND (?2 OR r.returned = 0)
                 ORDER BY r.borrow_date, r.id",
            )
            .map_err(from_rusqlite)?;

        let loans = stmt
            .query_map(params![reader_id, include_history], rows::loan)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(loans)
    }

    /// # Errors
    /// `Persistence` on query failure.
    pub fn count_active_loans_for_book(conn: &Connection, book_id: BookId) -> Result<usize> {
        Self::count(
            conn,
            "SELECT COUNT(*) FROM borrow_records WHERE book_id = ?1 AND returned = 0",
            book_id,
        )
    }

    /// Active and historical records referencing the book
    ///
    /// # Errors
    /// `Persistence` on query failure.
    pub fn count_records_for_book(conn: &Connection, book_id: BookId) -> Result<usize> {
        Self::count(
            conn,
            "SELECT COUNT(*) FROM borrow_records WHERE book_id = ?1",
            book_id,
        )
    }

    /// # Errors
    /// `Persistence` on query failure.
    pub fn count_active_loans_for_reader(
        conn: &Connection,
        reader_id: ReaderId,
    ) -> Result<usize> {
        Self::count(
            conn,
            "SELECT COUNT(*) FROM borrow_records WHERE reader_id = ?1 AND returned = 0",
            reader_id,
        )
    }

    fn count(conn: &Connection, sql: &str, id: i64) -> Result<usize> {
        let n: i64 = conn
            .query_row(sql, [id], |row| row.get(0))
            .map_err(from_rusqlite)?;
        usize::try_from(n).map_err(|_| corrupt_row("count", format!("negative count {}", n)))
    }
}
