#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end runs of the `libris` binary against a scratch ledger

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn db_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("library.db")
}

fn libris(db: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_libris"))
        .env_remove("LIBRIS_DB_PATH")
        .env("LIBRIS_LOG_FORMAT", "test")
        .arg("--db")
        .arg(db)
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn json_ok(db: &Path, args: &[&str]) -> Value {
    let output = libris(db, args);
    assert!(
        output.status.success(),
        "libris {:?} should succeed. Stderr: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn id_of(value: &Value) -> String {
    value["id"].as_i64().unwrap().to_string()
}

#[test]
fn test_cli_borrow_and_return_cycle() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    let book = json_ok(
        &db,
        &["book", "add", "--title", "Dune", "--authors", "Frank Herbert"],
    );
    assert_eq!(book["available_stock"], 1);
    let reader = json_ok(
        &db,
        &["reader", "add", "--name", "Ada", "--email", "ada@example.org"],
    );
    let librarian = json_ok(
        &db,
        &[
            "user",
            "add",
            "--name",
            "Lib",
            "--email",
            "lib@example.org",
            "--password-hash",
            "$2b$12$opaque",
        ],
    );
    assert_eq!(librarian["password_hash"], "***REDACTED***");

    let (book_id, reader_id, librarian_id) = (id_of(&book), id_of(&reader), id_of(&librarian));
    let loan = [
        "--book",
        book_id.as_str(),
        "--reader",
        reader_id.as_str(),
        "--librarian",
        librarian_id.as_str(),
    ];

    let borrowed = json_ok(&db, &[&["borrow"][..], &loan[..]].concat());
    assert_eq!(borrowed["returned"], false);

    let shown = json_ok(&db, &["book", "show", book_id.as_str()]);
    assert_eq!(shown["available_stock"], 0);

    let detail = json_ok(&db, &["reader", "show", reader_id.as_str()]);
    assert_eq!(detail["loans"].as_array().unwrap().len(), 1);

    let returned = json_ok(&db, &[&["return"][..], &loan[..]].concat());
    assert_eq!(returned["returned"], true);

    let detail = json_ok(&db, &["reader", "show", reader_id.as_str()]);
    assert!(detail["loans"].as_array().unwrap().is_empty());
    let history = json_ok(&db, &["reader", "show", reader_id.as_str(), "--history"]);
    assert_eq!(history["loans"].as_array().unwrap().len(), 1);
}

#[test]
fn test_cli_rejection_exits_nonzero_with_code() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    let book = json_ok(
        &db,
        &["book", "add", "--title", "Rare", "--authors", "A", "--stock", "0"],
    );
    let reader = json_ok(
        &db,
        &["reader", "add", "--name", "Ada", "--email", "ada@example.org"],
    );
    let librarian = json_ok(
        &db,
        &[
            "user",
            "add",
            "--name",
            "Lib",
            "--email",
            "lib@example.org",
            "--password-hash",
            "h",
        ],
    );

    let output = libris(
        &db,
        &[
            "borrow",
            "--book",
            id_of(&book).as_str(),
            "--reader",
            id_of(&reader).as_str(),
            "--librarian",
            id_of(&librarian).as_str(),
        ],
    );

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("ERR_NO_COPIES_AVAILABLE"),
        "stderr was: {}",
        stderr
    );
}

#[test]
fn test_cli_missing_reader_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    let output = libris(&db, &["reader", "show", "42"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_NOT_FOUND"));
}

#[test]
fn test_cli_book_update_and_delete() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    let book = json_ok(&db, &["book", "add", "--title", "Draft", "--authors", "A"]);
    let book_id = id_of(&book);

    let updated = json_ok(
        &db,
        &["book", "update", book_id.as_str(), "--title", "Final", "--stock", "4"],
    );
    assert_eq!(updated["title"], "Final");
    assert_eq!(updated["available_stock"], 4);

    let deleted = json_ok(&db, &["book", "delete", book_id.as_str()]);
    assert_eq!(deleted["deleted"], "book");

    let output = libris(&db, &["book", "show", book_id.as_str()]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_user_lookup_by_email() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    json_ok(
        &db,
        &[
            "user",
            "add",
            "--name",
            "Lib",
            "--email",
            "lib@example.org",
            "--password-hash",
            "h",
        ],
    );

    let found = json_ok(&db, &["user", "show", "--email", "lib@example.org"]);
    assert_eq!(found["name"], "Lib");
}
