//! Single entry point for every mutating library operation.

use libris_core::model::{
    Book, BookId, BookPatch, BorrowRecord, NewBook, NewReader, NewUser, Reader, ReaderId,
    ReaderPatch, User, UserId, UserPatch,
};
use libris_core_types::RequestContext;
use libris_store::errors::Result;
use rusqlite::Connection;

use crate::commands::{borrowing, catalog, deletion};

/// Mutating commands understood by the engine
#[derive(Debug, Clone)]
pub enum EngineCommand {
    BorrowBook {
        book_id: BookId,
        reader_id: ReaderId,
        librarian_id: UserId,
    },
    ReturnBook {
        book_id: BookId,
        reader_id: ReaderId,
        librarian_id: UserId,
    },
    DeleteReader {
        reader_id: ReaderId,
    },
    DeleteBook {
        book_id: BookId,
    },
    CreateBook(NewBook),
    UpdateBook {
        book_id: BookId,
        patch: BookPatch,
    },
    CreateReader(NewReader),
    UpdateReader {
        reader_id: ReaderId,
        patch: ReaderPatch,
    },
    RegisterUser(NewUser),
    UpdateUser {
        user_id: UserId,
        patch: UserPatch,
    },
}

/// Result of applying an engine command.
#[derive(Debug, Clone)]
pub enum EngineCommandResult {
    /// A loan was opened.
    Borrowed(BorrowRecord),
    /// A loan was closed.
    Returned(BorrowRecord),
    /// A reader or book was removed.
    Deleted,
    Book(Book),
    Reader(Reader),
    User(User),
}

/// Apply an engine command.
///
/// # Errors
/// Whatever the routed operation reports.
pub fn apply_engine_command(
    cmd: EngineCommand,
    conn: &mut Connection,
    ctx: &RequestContext,
) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::BorrowBook {
            book_id,
            reader_id,
            librarian_id,
        } => borrowing::borrow_book(conn, ctx, book_id, reader_id, librarian_id)
            .map(EngineCommandResult::Borrowed),
        EngineCommand::ReturnBook {
            book_id,
            reader_id,
            librarian_id,
        } => borrowing::return_book(conn, ctx, book_id, reader_id, librarian_id)
            .map(EngineCommandResult::Returned),
        EngineCommand::DeleteReader { reader_id } => {
            deletion::delete_reader(conn, ctx, reader_id).map(|()| EngineCommandResult::Deleted)
        }
        EngineCommand::DeleteBook { book_id } => {
            deletion::delete_book(conn, ctx, book_id).map(|()| EngineCommandResult::Deleted)
        }
        EngineCommand::CreateBook(new_book) => {
            catalog::create_book(conn, ctx, new_book).map(EngineCommandResult::Book)
        }
        EngineCommand::UpdateBook { book_id, patch } => {
            catalog::update_book(conn, ctx, book_id, patch).map(EngineCommandResult::Book)
        }
        EngineCommand::CreateReader(new_reader) => {
            catalog::create_reader(conn, ctx, new_reader).map(EngineCommandResult::Reader)
        }
        EngineCommand::UpdateReader { reader_id, patch } => {
            catalog::update_reader(conn, ctx, reader_id, patch).map(EngineCommandResult::Reader)
        }
        EngineCommand::RegisterUser(new_user) => {
            catalog::register_user(conn, ctx, new_user).map(EngineCommandResult::User)
        }
        EngineCommand::UpdateUser { user_id, patch } => {
            catalog::update_user(conn, ctx, user_id, patch).map(EngineCommandResult::User)
        }
    }
}
