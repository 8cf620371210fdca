#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{add_book, add_librarian, add_reader, ctx, setup_db};
use libris_core::errors::ExErrorKind;
use libris_engine::commands::borrowing::{borrow_book, return_book};
use libris_engine::commands::queries::{active_loan_count, get_reader_detail};

#[test]
fn test_reader_detail_active_only_vs_history() {
    let mut conn = setup_db();
    let reader = add_reader(&conn, "Ada");
    let librarian = add_librarian(&conn, "Lib");
    let first = add_book(&conn, "First", 1);
    let second = add_book(&conn, "Second", 1);

    borrow_book(&mut conn, &ctx(), first.id, reader.id, librarian.id).unwrap();
    borrow_book(&mut conn, &ctx(), second.id, reader.id, librarian.id).unwrap();
    return_book(&mut conn, &ctx(), first.id, reader.id, librarian.id).unwrap();

    let active = get_reader_detail(&conn, &ctx(), reader.id, false).unwrap();
    assert_eq!(active.name, "Ada");
    assert_eq!(active.loans.len(), 1);
    assert_eq!(active.loans[0].book.title, "Second");
    assert!(!active.loans[0].returned);

    let history = get_reader_detail(&conn, &ctx(), reader.id, true).unwrap();
    assert_eq!(history.loans.len(), 2);
    assert_eq!(history.active_loans().count(), 1);
    let ids: Vec<_> = history.loans.iter().map(|l| l.record_id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted, "loans ordered by borrow date then id");
    assert!(history.loans[0].returned);
    assert!(history.loans[0].return_date.is_some());
}

#[test]
fn test_reader_detail_shows_current_book_state() {
    let mut conn = setup_db();
    let reader = add_reader(&conn, "Ada");
    let librarian = add_librarian(&conn, "Lib");
    let book = add_book(&conn, "Dune", 2);
    borrow_book(&mut conn, &ctx(), book.id, reader.id, librarian.id).unwrap();

    let view = get_reader_detail(&conn, &ctx(), reader.id, false).unwrap();
    assert_eq!(view.loans[0].book.available_stock, 1);
    assert_eq!(view.loans[0].issued_by, Some(librarian.id));
}

#[test]
fn test_reader_detail_missing_reader() {
    let conn = setup_db();
    let err = get_reader_detail(&conn, &ctx(), 5, false).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.status_code(), 404);
}

#[test]
fn test_reader_detail_serializes_to_json() {
    let mut conn = setup_db();
    let reader = add_reader(&conn, "Ada");
    let librarian = add_librarian(&conn, "Lib");
    let book = add_book(&conn, "Dune", 1);
    borrow_book(&mut conn, &ctx(), book.id, reader.id, librarian.id).unwrap();

    let view = get_reader_detail(&conn, &ctx(), reader.id, false).unwrap();
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["name"], "Ada");
    assert_eq!(json["loans"][0]["book"]["title"], "Dune");
    assert_eq!(json["loans"][0]["returned"], false);
}

#[test]
fn test_stock_plus_active_loans_is_constant() {
    let mut conn = setup_db();
    let librarian = add_librarian(&conn, "Lib");
    let book = add_book(&conn, "Popular", 3);
    let readers: Vec<_> = ["Ada", "Bob", "Cy"]
        .iter()
        .map(|n| add_reader(&conn, n))
        .collect();

    let total = |conn: &rusqlite::Connection| {
        let stock = libris_engine::commands::queries::get_book(conn, &ctx(), book.id)
            .unwrap()
            .available_stock;
        stock + active_loan_count(conn, &ctx(), book.id).unwrap() as i64
    };

    assert_eq!(total(&conn), 3);
    for r in &readers {
        borrow_book(&mut conn, &ctx(), book.id, r.id, librarian.id).unwrap();
        assert_eq!(total(&conn), 3);
    }
    return_book(&mut conn, &ctx(), book.id, readers[1].id, librarian.id).unwrap();
    assert_eq!(total(&conn), 3);
    assert_eq!(active_loan_count(&conn, &ctx(), book.id).unwrap(), 2);
}
