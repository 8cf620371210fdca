#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use libris_core::model::{Book, NewBook, NewReader, NewUser, Reader, User};
use libris_core_types::RequestContext;
use libris_engine::commands::catalog;
use libris_store::{db, StoreConfig};
use rusqlite::Connection;
use std::time::Duration;
use tempfile::TempDir;

/// File-backed ledger in a scratch directory
pub struct TestLedger {
    pub dir: TempDir,
    pub config: StoreConfig,
}

impl TestLedger {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = StoreConfig::file(dir.path().join("library.db"))
            .with_busy_timeout(Duration::from_secs(10));
        // Migrate once up front so later connections only open
        db::connect(&config).unwrap();
        Self { dir, config }
    }

    pub fn connect(&self) -> Connection {
        db::connect(&self.config).unwrap()
    }
}

pub fn setup_db() -> Connection {
    db::connect(&StoreConfig::in_memory()).unwrap()
}

pub fn ctx() -> RequestContext {
    RequestContext::new()
}

pub fn add_book(conn: &Connection, title: &str, stock: i64) -> Book {
    catalog::create_book(conn, &ctx(), NewBook::new(title, "Some Author").with_stock(stock))
        .unwrap()
}

pub fn add_reader(conn: &Connection, name: &str) -> Reader {
    let email = format!("{}@readers.example.org", name.to_lowercase().replace(' ', "."));
    catalog::create_reader(conn, &ctx(), NewReader::new(name, email)).unwrap()
}

pub fn add_librarian(conn: &Connection, name: &str) -> User {
    let email = format!("{}@staff.example.org", name.to_lowercase().replace(' ', "."));
    catalog::register_user(conn, &ctx(), NewUser::new(name, email, "$2b$12$opaque")).unwrap()
}

pub fn stock_of(conn: &Connection, book_id: i64) -> i64 {
    conn.query_row(
        "SELECT available_stock FROM books WHERE id = ?1",
        [book_id],
        |row| row.get(0),
    )
    .unwrap()
}

pub fn record_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM borrow_records", [], |row| row.get(0))
        .unwrap()
}
