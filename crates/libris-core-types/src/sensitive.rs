//! Redacting wrapper for secrets
//!
//! Librarian password hashes travel through the model as `Sensitive<String>`
//! so that neither `Debug`, `Display` nor JSON output can leak them.

use serde::{Serialize, Serializer};
use std::fmt;

const REDACTED: &str = "***REDACTED***";

/// Wrapper that never prints its contents
///
/// ```
/// use libris_core_types::Sensitive;
///
/// let hash = Sensitive::new("$2b$12$abc".to_string());
/// assert_eq!(format!("{:?}", hash), "***REDACTED***");
/// assert_eq!(hash.expose(), "$2b$12$abc");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the secret; only persistence and credential checks should need this
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> Serialize for Sensitive<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED)
    }
}
