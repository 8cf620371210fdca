//! Read-side projections served by the query facade

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Book, BorrowRecord, Reader, ReaderId, RecordId, UserId};

/// A reader together with an explicitly fetched set of loans
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReaderView {
    pub id: ReaderId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub loans: Vec<LoanView>,
}

impl ReaderView {
    pub fn new(reader: Reader, loans: Vec<LoanView>) -> Self {
        Self {
            id: reader.id,
            name: reader.name,
            email: reader.email,
            created_at: reader.created_at,
            loans,
        }
    }

    pub fn active_loans(&self) -> impl Iterator<Item = &LoanView> {
        self.loans.iter().filter(|loan| !loan.returned)
    }
}

/// One borrow record joined with the book it refers to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanView {
    pub record_id: RecordId,
    pub book: Book,
    pub borrow_date: DateTime<Utc>,
    pub returned: bool,
    pub return_date: Option<DateTime<Utc>>,
    pub librarian_id: Option<UserId>,
    pub issued_by: Option<UserId>,
}

impl LoanView {
    pub fn new(record: BorrowRecord, book: Book) -> Self {
        Self {
            record_id: record.id,
            book,
            borrow_date: record.borrow_date,
            returned: record.returned,
            return_date: record.return_date,
            librarian_id: record.librarian_id,
            issued_by: record.issued_by,
        }
    }
}
