pub mod book;
pub mod borrow_record;
pub mod reader;
pub mod user;
pub mod view;

pub use book::{Book, BookPatch, NewBook};
pub use borrow_record::BorrowRecord;
pub use reader::{NewReader, Reader, ReaderPatch};
pub use user::{NewUser, User, UserPatch};
pub use view::{LoanView, ReaderView};

/// Store-assigned row identifiers
pub type BookId = i64;
pub type ReaderId = i64;
pub type UserId = i64;
pub type RecordId = i64;
