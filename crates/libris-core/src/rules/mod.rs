//! Pure library rules
//!
//! Nothing here touches storage. The engine loads the rows a rule needs inside
//! its unit of work, asks the rule, and only then writes.

pub mod borrowing;
pub mod validation;

pub use borrowing::{
    check_book_deletable, check_borrow, check_reader_deletable, select_loan_to_return,
    MAX_ACTIVE_LOANS,
};
