use serde::{Deserialize, Serialize};

use super::BookId;
use crate::errors::{LibraryError, Result};

/// A catalogued title and the number of its copies currently on the shelf
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,

    pub title: String,

    pub release_year: Option<i32>,

    /// Free-form author list, as entered by staff
    pub authors: String,

    pub description: Option<String>,

    /// ISBN-10 or ISBN-13; unique across the catalogue when present
    pub isbn: Option<String>,

    /// Copies that can be lent right now. Never negative.
    pub available_stock: i64,
}

impl Book {
    pub fn has_copies_available(&self) -> bool {
        self.available_stock > 0
    }

    /// Take one copy off the shelf
    ///
    /// # Errors
    /// `NoCopiesAvailable` when the shelf is empty.
    pub fn take_copy(&mut self) -> Result<()> {
        if !self.has_copies_available() {
            return Err(LibraryError::NoCopiesAvailable { book_id: self.id });
        }
        self.available_stock -= 1;
        Ok(())
    }

    /// Put one copy back on the shelf
    ///
    /// # Errors
    /// `Internal` if the counter would overflow.
    pub fn restore_copy(&mut self) -> Result<()> {
        self.available_stock =
            self.available_stock
                .checked_add(1)
                .ok_or_else(|| LibraryError::Internal {
                    message: format!("stock counter overflow for book {}", self.id),
                })?;
        Ok(())
    }
}

/// Input for cataloguing a new book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub release_year: Option<i32>,
    pub authors: String,
    pub description: Option<String>,
    pub isbn: Option<String>,
    pub available_stock: i64,
}

impl NewBook {
    /// A book with the given title and authors and a single copy
    pub fn new(title: impl Into<String>, authors: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            release_year: None,
            authors: authors.into(),
            description: None,
            isbn: None,
            available_stock: 1,
        }
    }

    pub fn with_stock(mut self, available_stock: i64) -> Self {
        self.available_stock = available_stock;
        self
    }

    pub fn with_isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = Some(isbn.into());
        self
    }

    pub fn with_release_year(mut self, year: i32) -> Self {
        self.release_year = Some(year);
        self
    }
}

/// Partial update; only `Some` fields are written
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPatch {
    pub title: Option<String>,
    pub release_year: Option<i32>,
    pub authors: Option<String>,
    pub description: Option<String>,
    pub isbn: Option<String>,
    pub available_stock: Option<i64>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(self, book: &mut Book) {
        if let Some(title) = self.title {
            book.title = title;
        }
        if let Some(year) = self.release_year {
            book.release_year = Some(year);
        }
        if let Some(authors) = self.authors {
            book.authors = authors;
        }
        if let Some(description) = self.description {
            book.description = Some(description);
        }
        if let Some(isbn) = self.isbn {
            book.isbn = Some(isbn);
        }
        if let Some(stock) = self.available_stock {
            book.available_stock = stock;
        }
    }
}
