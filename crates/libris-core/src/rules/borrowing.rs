use crate::errors::{LibraryError, Result};
use crate::model::{Book, BookId, BorrowRecord, Reader, ReaderId};

/// Maximum number of simultaneously active loans per reader
pub const MAX_ACTIVE_LOANS: usize = 3;

/// Decide whether `reader` may borrow `book`
///
/// `reader_loans` must be the reader's *active* records, read in the same unit
/// of work that will perform the borrow. Checks run in a fixed order: stock,
/// then the per-reader limit, then the duplicate-loan rule.
///
/// # Errors
/// `NoCopiesAvailable`, `BorrowLimitReached` or `AlreadyBorrowed`.
pub fn check_borrow(book: &Book, reader: &Reader, reader_loans: &[BorrowRecord]) -> Result<()> {
    if !book.has_copies_available() {
        return Err(LibraryError::NoCopiesAvailable { book_id: book.id });
    }

    let active: Vec<&BorrowRecord> = reader_loans.iter().filter(|r| r.is_active()).collect();
    if active.len() >= MAX_ACTIVE_LOANS {
        return Err(LibraryError::BorrowLimitReached {
            reader_id: reader.id,
            reader_name: reader.name.clone(),
            limit: MAX_ACTIVE_LOANS,
        });
    }

    if active.iter().any(|r| r.book_id == book.id) {
        return Err(LibraryError::AlreadyBorrowed {
            book_id: book.id,
            reader_id: reader.id,
        });
    }

    Ok(())
}

/// Pick the active record a return should close
///
/// At most one should exist; if the store ever holds several, the earliest by
/// `(borrow_date, id)` wins so the choice is deterministic.
///
/// # Errors
/// `NotBorrowed` when the reader holds no active loan of this book.
pub fn select_loan_to_return(
    book_id: BookId,
    reader_id: ReaderId,
    candidates: &[BorrowRecord],
) -> Result<&BorrowRecord> {
    candidates
        .iter()
        .filter(|r| r.is_active() && r.book_id == book_id && r.reader_id == reader_id)
        .min_by_key(|r| (r.borrow_date, r.id))
        .ok_or(LibraryError::NotBorrowed { book_id, reader_id })
}

/// A reader may only be removed once every loan is back
///
/// # Errors
/// `ReaderHasActiveLoans` when `active_loans > 0`.
pub fn check_reader_deletable(reader_id: ReaderId, active_loans: usize) -> Result<()> {
    if active_loans > 0 {
        return Err(LibraryError::ReaderHasActiveLoans {
            reader_id,
            active_loans,
        });
    }
    Ok(())
}

/// A book that appears in any borrow record, returned or not, stays catalogued
///
/// # Errors
/// `BookHasBorrowRecords` when `records > 0`.
pub fn check_book_deletable(book_id: BookId, records: usize) -> Result<()> {
    if records > 0 {
        return Err(LibraryError::BookHasBorrowRecords { book_id });
    }
    Ok(())
}
