use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookId, ReaderId, RecordId, UserId};
use crate::errors::{LibraryError, Result};

/// One loan of one book to one reader
///
/// Created by a borrow and mutated in place by the matching return. A record
/// with `returned == false` is an *active loan*.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowRecord {
    pub id: RecordId,
    pub book_id: BookId,
    pub reader_id: ReaderId,
    pub borrow_date: DateTime<Utc>,
    pub returned: bool,
    pub return_date: Option<DateTime<Utc>>,
    /// Librarian who processed the most recent event on this record
    pub librarian_id: Option<UserId>,
    /// Librarian who processed the borrow; never overwritten
    pub issued_by: Option<UserId>,
}

impl BorrowRecord {
    pub fn is_active(&self) -> bool {
        !self.returned
    }

    /// Close the loan, recording who processed the return
    ///
    /// # Errors
    /// `NotBorrowed` if the record was already returned.
    pub fn mark_returned(&mut self, librarian_id: UserId, at: DateTime<Utc>) -> Result<()> {
        if self.returned {
            return Err(LibraryError::NotBorrowed {
                book_id: self.book_id,
                reader_id: self.reader_id,
            });
        }
        self.returned = true;
        self.return_date = Some(at);
        self.librarian_id = Some(librarian_id);
        Ok(())
    }
}
