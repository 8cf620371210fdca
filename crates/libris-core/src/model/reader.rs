use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ReaderId;

/// A library patron. Loans are not held here; they are queried by reader id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reader {
    pub id: ReaderId,
    pub name: String,
    /// Unique across readers
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReader {
    pub name: String,
    pub email: String,
}

impl NewReader {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl ReaderPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }

    pub fn apply(self, reader: &mut Reader) {
        if let Some(name) = self.name {
            reader.name = name;
        }
        if let Some(email) = self.email {
            reader.email = email;
        }
    }
}
