//! Input validation for catalogue writes

use crate::errors::{LibraryError, Result};
use crate::model::{BookPatch, NewBook, NewReader, NewUser, ReaderPatch, UserPatch};

const MAX_NAME_LEN: usize = 100;
const MAX_AUTHORS_LEN: usize = 255;
const MAX_DESCRIPTION_LEN: usize = 255;
const MAX_ISBN_LEN: usize = 13;

fn invalid(field: &'static str, reason: impl Into<String>) -> LibraryError {
    LibraryError::InvalidInput {
        field,
        reason: reason.into(),
    }
}

fn require_text(field: &'static str, value: &str, max_len: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, "cannot be empty"));
    }
    if value.chars().count() > max_len {
        return Err(invalid(field, format!("longer than {} characters", max_len)));
    }
    Ok(())
}

fn require_email(value: &str) -> Result<()> {
    require_text("email", value, MAX_NAME_LEN)?;
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(invalid("email", "not an email address")),
    }
}

fn require_isbn(value: &str) -> Result<()> {
    require_text("isbn", value, MAX_ISBN_LEN)?;
    if !value.chars().all(|c| c.is_ascii_digit() || c == 'X' || c == 'x') {
        return Err(invalid("isbn", "only digits and X are allowed"));
    }
    Ok(())
}

fn require_stock(value: i64) -> Result<()> {
    if value < 0 {
        return Err(invalid("available_stock", "cannot be negative"));
    }
    Ok(())
}

fn require_description(value: &str) -> Result<()> {
    if value.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(invalid(
            "description",
            format!("longer than {} characters", MAX_DESCRIPTION_LEN),
        ));
    }
    Ok(())
}

/// # Errors
/// `InvalidInput` naming the first offending field.
pub fn validate_new_book(book: &NewBook) -> Result<()> {
    require_text("title", &book.title, MAX_NAME_LEN)?;
    require_text("authors", &book.authors, MAX_AUTHORS_LEN)?;
    if let Some(isbn) = &book.isbn {
        require_isbn(isbn)?;
    }
    if let Some(description) = &book.description {
        require_description(description)?;
    }
    require_stock(book.available_stock)
}

/// # Errors
/// `InvalidInput` naming the first offending field.
pub fn validate_book_patch(patch: &BookPatch) -> Result<()> {
    if let Some(title) = &patch.title {
        require_text("title", title, MAX_NAME_LEN)?;
    }
    if let Some(authors) = &patch.authors {
        require_text("authors", authors, MAX_AUTHORS_LEN)?;
    }
    if let Some(isbn) = &patch.isbn {
        require_isbn(isbn)?;
    }
    if let Some(description) = &patch.description {
        require_description(description)?;
    }
    if let Some(stock) = patch.available_stock {
        require_stock(stock)?;
    }
    Ok(())
}

/// # Errors
/// `InvalidInput` naming the first offending field.
pub fn validate_new_reader(reader: &NewReader) -> Result<()> {
    require_text("name", &reader.name, MAX_NAME_LEN)?;
    require_email(&reader.email)
}

/// # Errors
/// `InvalidInput` naming the first offending field.
pub fn validate_reader_patch(patch: &ReaderPatch) -> Result<()> {
    if let Some(name) = &patch.name {
        require_text("name", name, MAX_NAME_LEN)?;
    }
    if let Some(email) = &patch.email {
        require_email(email)?;
    }
    Ok(())
}

/// # Errors
/// `InvalidInput` naming the first offending field.
pub fn validate_new_user(user: &NewUser) -> Result<()> {
    require_text("name", &user.name, MAX_NAME_LEN)?;
    require_email(&user.email)?;
    if user.password_hash.expose().is_empty() {
        return Err(invalid("password_hash", "cannot be empty"));
    }
    Ok(())
}

/// # Errors
/// `InvalidInput` naming the first offending field.
pub fn validate_user_patch(patch: &UserPatch) -> Result<()> {
    if let Some(name) = &patch.name {
        require_text("name", name, MAX_NAME_LEN)?;
    }
    if let Some(email) = &patch.email {
        require_email(email)?;
    }
    if let Some(hash) = &patch.password_hash {
        if hash.expose().is_empty() {
            return Err(invalid("password_hash", "cannot be empty"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_book_passes() {
        let book = NewBook::new("Dune", "Frank Herbert")
            .with_isbn("9780441013593")
            .with_stock(4);
        assert!(validate_new_book(&book).is_ok());
    }

    #[test]
    fn test_blank_title_rejected() {
        let book = NewBook::new("   ", "Frank Herbert");
        assert!(matches!(
            validate_new_book(&book),
            Err(LibraryError::InvalidInput { field: "title", .. })
        ));
    }

    #[test]
    fn test_negative_stock_rejected() {
        let book = NewBook::new("Dune", "Frank Herbert").with_stock(-1);
        assert!(matches!(
            validate_new_book(&book),
            Err(LibraryError::InvalidInput {
                field: "available_stock",
                ..
            })
        ));
    }

    #[test]
    fn test_isbn_too_long_rejected() {
        let book = NewBook::new("Dune", "Frank Herbert").with_isbn("97804410135931");
        assert!(validate_new_book(&book).is_err());
    }

    #[test]
    fn test_reader_email_shape() {
        assert!(validate_new_reader(&NewReader::new("Ada", "ada@example.org")).is_ok());
        assert!(validate_new_reader(&NewReader::new("Ada", "ada.example.org")).is_err());
        assert!(validate_new_reader(&NewReader::new("Ada", "@example.org")).is_err());
    }

    #[test]
    fn test_empty_patch_is_valid() {
        assert!(validate_book_patch(&BookPatch::default()).is_ok());
        assert!(validate_reader_patch(&ReaderPatch::default()).is_ok());
        assert!(validate_user_patch(&UserPatch::default()).is_ok());
    }

    #[test]
    fn test_user_requires_hash() {
        assert!(validate_new_user(&NewUser::new("Ann", "ann@library.org", "")).is_err());
        assert!(validate_new_user(&NewUser::new("Ann", "ann@library.org", "h")).is_ok());
    }
}
