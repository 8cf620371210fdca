#![allow(clippy::unwrap_used, clippy::expect_used)]

use libris_core::errors::{ErrorCategory, ExError, ExErrorKind, LibraryError};
use libris_core_types::RequestId;

#[test]
fn test_not_found_carries_typed_entity() {
    let ex: ExError = LibraryError::ReaderNotFound { reader_id: 12 }.into();

    assert_eq!(ex.kind(), ExErrorKind::NotFound);
    assert_eq!(ex.code(), "ERR_NOT_FOUND");
    assert_eq!(ex.entity_id(), Some("reader:12"));
    assert_eq!(ex.status_code(), 404);
}

#[test]
fn test_rule_violations_are_distinct_kinds() {
    let cases: Vec<(LibraryError, ExErrorKind)> = vec![
        (
            LibraryError::NoCopiesAvailable { book_id: 1 },
            ExErrorKind::NoCopiesAvailable,
        ),
        (
            LibraryError::BorrowLimitReached {
                reader_id: 1,
                reader_name: "Ada".to_string(),
                limit: 3,
            },
            ExErrorKind::BorrowLimitReached,
        ),
        (
            LibraryError::AlreadyBorrowed {
                book_id: 1,
                reader_id: 2,
            },
            ExErrorKind::AlreadyBorrowed,
        ),
        (
            LibraryError::NotBorrowed {
                book_id: 1,
                reader_id: 2,
            },
            ExErrorKind::NotBorrowed,
        ),
        (
            LibraryError::ReaderHasActiveLoans {
                reader_id: 2,
                active_loans: 1,
            },
            ExErrorKind::CannotDelete,
        ),
        (
            LibraryError::BookHasBorrowRecords { book_id: 1 },
            ExErrorKind::CannotDelete,
        ),
    ];

    for (err, expected) in cases {
        let ex: ExError = err.into();
        assert_eq!(ex.kind(), expected);
        assert_eq!(ex.category(), ErrorCategory::Rejected);
    }
}

#[test]
fn test_error_codes_are_unique() {
    let kinds = [
        ExErrorKind::NotFound,
        ExErrorKind::InvalidInput,
        ExErrorKind::NoCopiesAvailable,
        ExErrorKind::BorrowLimitReached,
        ExErrorKind::AlreadyBorrowed,
        ExErrorKind::NotBorrowed,
        ExErrorKind::CannotDelete,
        ExErrorKind::AlreadyExists,
        ExErrorKind::ConstraintViolation,
        ExErrorKind::Persistence,
        ExErrorKind::Concurrency,
        ExErrorKind::Serialization,
        ExErrorKind::Io,
        ExErrorKind::Internal,
    ];
    let mut codes: Vec<&str> = kinds.iter().map(|k| k.code()).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), kinds.len());
    assert!(codes.iter().all(|c| c.starts_with("ERR_")));
}

#[test]
fn test_request_id_attached_to_error() {
    let request_id = RequestId::from("req-42".to_string());
    let ex: ExError = ExError::from(LibraryError::BookNotFound { book_id: 3 })
        .with_request_id(request_id.clone())
        .with_op("borrow_book");

    assert_eq!(ex.request_id(), Some(&request_id));
    assert_eq!(ex.op(), Some("borrow_book"));
}

#[test]
fn test_persistence_failures_are_internal() {
    let ex = ExError::new(ExErrorKind::Persistence).with_message("disk I/O error");
    assert_eq!(ex.category(), ErrorCategory::Internal);
    assert_eq!(ex.status_code(), 500);
}

#[test]
fn test_serde_json_error_converts() {
    let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let err: LibraryError = parse_err.into();
    let ex: ExError = err.into();
    assert_eq!(ex.kind(), ExErrorKind::Serialization);
}
