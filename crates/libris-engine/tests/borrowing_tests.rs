#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{add_book, add_librarian, add_reader, ctx, record_count, setup_db, stock_of};
use libris_core::errors::ExErrorKind;
use libris_core::ErrorCategory;
use libris_engine::commands::borrowing::{borrow_book, return_book};
use libris_engine::commands::queries::active_loan_count;

#[test]
fn test_borrow_decrements_stock_and_opens_record() {
    let mut conn = setup_db();
    let book = add_book(&conn, "Dune", 2);
    let reader = add_reader(&conn, "Ada");
    let librarian = add_librarian(&conn, "Lib");

    let record = borrow_book(&mut conn, &ctx(), book.id, reader.id, librarian.id).unwrap();

    assert!(!record.returned);
    assert!(record.return_date.is_none());
    assert_eq!(record.book_id, book.id);
    assert_eq!(record.reader_id, reader.id);
    assert_eq!(record.librarian_id, Some(librarian.id));
    assert_eq!(record.issued_by, Some(librarian.id));
    assert_eq!(stock_of(&conn, book.id), 1);
}

#[test]
fn test_borrow_then_return_restores_stock() {
    let mut conn = setup_db();
    let book = add_book(&conn, "Dune", 1);
    let reader = add_reader(&conn, "Ada");
    let issuer = add_librarian(&conn, "Issuer");
    let closer = add_librarian(&conn, "Closer");

    let borrowed = borrow_book(&mut conn, &ctx(), book.id, reader.id, issuer.id).unwrap();
    let returned = return_book(&mut conn, &ctx(), book.id, reader.id, closer.id).unwrap();

    assert_eq!(returned.id, borrowed.id);
    assert!(returned.returned);
    assert!(returned.return_date.is_some());
    assert!(returned.return_date.unwrap() >= returned.borrow_date);
    assert_eq!(returned.librarian_id, Some(closer.id));
    assert_eq!(returned.issued_by, Some(issuer.id));
    assert_eq!(stock_of(&conn, book.id), 1);
    assert_eq!(record_count(&conn), 1);
}

#[test]
fn test_borrow_missing_entities_not_found_in_check_order() {
    let mut conn = setup_db();
    let book = add_book(&conn, "Dune", 1);
    let reader = add_reader(&conn, "Ada");
    let librarian = add_librarian(&conn, "Lib");

    let err = borrow_book(&mut conn, &ctx(), 999, 998, 997).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.entity_id(), Some("book:999"));

    let err = borrow_book(&mut conn, &ctx(), book.id, 998, 997).unwrap_err();
    assert_eq!(err.entity_id(), Some("reader:998"));

    let err = borrow_book(&mut conn, &ctx(), book.id, reader.id, 997).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.entity_id(), Some("user:997"));
    assert_eq!(err.category(), ErrorCategory::NotFound);

    assert_eq!(stock_of(&conn, book.id), 1);
    assert_eq!(record_count(&conn), 0);
    assert!(borrow_book(&mut conn, &ctx(), book.id, reader.id, librarian.id).is_ok());
}

#[test]
fn test_no_copies_available_rejected() {
    let mut conn = setup_db();
    let book = add_book(&conn, "Rare", 0);
    let reader = add_reader(&conn, "Ada");
    let librarian = add_librarian(&conn, "Lib");

    let err = borrow_book(&mut conn, &ctx(), book.id, reader.id, librarian.id).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NoCopiesAvailable);
    assert_eq!(err.category(), ErrorCategory::Rejected);
    assert_eq!(err.status_code(), 400);
    assert_eq!(err.op(), Some("borrow_book"));
    assert_eq!(stock_of(&conn, book.id), 0);
    assert_eq!(record_count(&conn), 0);
}

#[test]
fn test_fourth_concurrent_loan_rejected() {
    let mut conn = setup_db();
    let reader = add_reader(&conn, "Ada");
    let librarian = add_librarian(&conn, "Lib");
    let books: Vec<_> = (0..4)
        .map(|i| add_book(&conn, &format!("Book {}", i), 1))
        .collect();

    for book in &books[..3] {
        borrow_book(&mut conn, &ctx(), book.id, reader.id, librarian.id).unwrap();
    }

    let err = borrow_book(&mut conn, &ctx(), books[3].id, reader.id, librarian.id).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::BorrowLimitReached);
    assert!(err.message().contains("Ada"));
    assert_eq!(stock_of(&conn, books[3].id), 1);

    // Returning one frees a slot
    return_book(&mut conn, &ctx(), books[0].id, reader.id, librarian.id).unwrap();
    borrow_book(&mut conn, &ctx(), books[3].id, reader.id, librarian.id).unwrap();
}

#[test]
fn test_duplicate_loan_rejected() {
    let mut conn = setup_db();
    let book = add_book(&conn, "Dune", 5);
    let reader = add_reader(&conn, "Ada");
    let librarian = add_librarian(&conn, "Lib");

    borrow_book(&mut conn, &ctx(), book.id, reader.id, librarian.id).unwrap();
    let err = borrow_book(&mut conn, &ctx(), book.id, reader.id, librarian.id).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::AlreadyBorrowed);
    assert_eq!(stock_of(&conn, book.id), 4);
    assert_eq!(record_count(&conn), 1);
}

#[test]
fn test_stock_checked_before_limit_and_duplicate() {
    let mut conn = setup_db();
    let book = add_book(&conn, "Dune", 1);
    let reader = add_reader(&conn, "Ada");
    let librarian = add_librarian(&conn, "Lib");

    // Reader holds the only copy: stock is zero and the loan is a duplicate
    borrow_book(&mut conn, &ctx(), book.id, reader.id, librarian.id).unwrap();
    let err = borrow_book(&mut conn, &ctx(), book.id, reader.id, librarian.id).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NoCopiesAvailable);
}

#[test]
fn test_return_never_borrowed_rejected_without_mutation() {
    let mut conn = setup_db();
    let book = add_book(&conn, "Dune", 3);
    let reader = add_reader(&conn, "Ada");
    let librarian = add_librarian(&conn, "Lib");

    let err = return_book(&mut conn, &ctx(), book.id, reader.id, librarian.id).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotBorrowed);
    assert_eq!(err.category(), ErrorCategory::Rejected);
    assert_eq!(stock_of(&conn, book.id), 3);
    assert_eq!(record_count(&conn), 0);
}

#[test]
fn test_second_return_rejected() {
    let mut conn = setup_db();
    let book = add_book(&conn, "Dune", 1);
    let reader = add_reader(&conn, "Ada");
    let librarian = add_librarian(&conn, "Lib");

    borrow_book(&mut conn, &ctx(), book.id, reader.id, librarian.id).unwrap();
    return_book(&mut conn, &ctx(), book.id, reader.id, librarian.id).unwrap();
    let err = return_book(&mut conn, &ctx(), book.id, reader.id, librarian.id).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotBorrowed);
    assert_eq!(stock_of(&conn, book.id), 1);
}

#[test]
fn test_return_of_book_held_by_someone_else_rejected() {
    let mut conn = setup_db();
    let book = add_book(&conn, "Dune", 2);
    let holder = add_reader(&conn, "Ada");
    let other = add_reader(&conn, "Bob");
    let librarian = add_librarian(&conn, "Lib");

    borrow_book(&mut conn, &ctx(), book.id, holder.id, librarian.id).unwrap();
    let err = return_book(&mut conn, &ctx(), book.id, other.id, librarian.id).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotBorrowed);
    assert_eq!(stock_of(&conn, book.id), 1);
}

#[test]
fn test_reader_can_borrow_again_after_return() {
    let mut conn = setup_db();
    let book = add_book(&conn, "Dune", 1);
    let reader = add_reader(&conn, "Ada");
    let librarian = add_librarian(&conn, "Lib");

    borrow_book(&mut conn, &ctx(), book.id, reader.id, librarian.id).unwrap();
    return_book(&mut conn, &ctx(), book.id, reader.id, librarian.id).unwrap();
    let again = borrow_book(&mut conn, &ctx(), book.id, reader.id, librarian.id).unwrap();

    assert!(!again.returned);
    assert_eq!(record_count(&conn), 2);
    assert_eq!(active_loan_count(&conn, &ctx(), book.id).unwrap(), 1);
}

#[test]
fn test_errors_carry_request_id() {
    let mut conn = setup_db();
    let request = ctx();

    let err = borrow_book(&mut conn, &request, 1, 1, 1).unwrap_err();
    assert_eq!(err.request_id(), Some(&request.request_id));
}
