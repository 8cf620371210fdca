use libris_core_types::{RequestId, TraceId};
use thiserror::Error;

use crate::model::{BookId, ReaderId, UserId};

/// Result type alias for pure domain operations
pub type Result<T> = std::result::Result<T, LibraryError>;

// ========== Error Facility ==========

/// How a failure is surfaced at the transport boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A referenced book, reader or librarian does not exist
    NotFound,
    /// A business rule refused the request
    Rejected,
    /// A uniqueness constraint was violated on create or update
    Conflict,
    /// Anything the caller cannot act upon
    Internal,
}

impl ErrorCategory {
    /// HTTP-equivalent status code for this category
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorCategory::NotFound => 404,
            ErrorCategory::Rejected => 400,
            ErrorCategory::Conflict => 409,
            ErrorCategory::Internal => 500,
        }
    }
}

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable code used by tests, logs and API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Lookup
    NotFound,

    // Business rules
    InvalidInput,
    NoCopiesAvailable,
    BorrowLimitReached,
    AlreadyBorrowed,
    NotBorrowed,
    CannotDelete,

    // Store
    AlreadyExists,
    /// A referential or check constraint the domain does not model explicitly
    ConstraintViolation,
    Persistence,
    /// The store stayed locked past the configured busy timeout
    Concurrency,
    Serialization,
    Io,

    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NoCopiesAvailable => "ERR_NO_COPIES_AVAILABLE",
            ExErrorKind::BorrowLimitReached => "ERR_BORROW_LIMIT_REACHED",
            ExErrorKind::AlreadyBorrowed => "ERR_ALREADY_BORROWED",
            ExErrorKind::NotBorrowed => "ERR_NOT_BORROWED",
            ExErrorKind::CannotDelete => "ERR_CANNOT_DELETE",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Concurrency => "ERR_CONCURRENCY",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Boundary category for this kind
    pub fn category(&self) -> ErrorCategory {
        match self {
            ExErrorKind::NotFound => ErrorCategory::NotFound,
            ExErrorKind::InvalidInput
            | ExErrorKind::NoCopiesAvailable
            | ExErrorKind::BorrowLimitReached
            | ExErrorKind::AlreadyBorrowed
            | ExErrorKind::NotBorrowed
            | ExErrorKind::CannotDelete => ErrorCategory::Rejected,
            ExErrorKind::AlreadyExists => ErrorCategory::Conflict,
            ExErrorKind::ConstraintViolation
            | ExErrorKind::Persistence
            | ExErrorKind::Concurrency
            | ExErrorKind::Serialization
            | ExErrorKind::Io
            | ExErrorKind::Internal => ErrorCategory::Internal,
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus the context
/// (operation, entity, request) needed to debug a failed request.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity context, e.g. `book:12`
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Fill in the operation only when a lower layer did not already name one
    pub fn or_op(self, op: &str) -> Self {
        if self.op.is_some() {
            self
        } else {
            self.with_op(op)
        }
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    pub fn status_code(&self) -> u16 {
        self.category().status_code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " ({})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain failures raised by the library rules
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LibraryError {
    // ===== Lookup =====
    #[error("Book not found: {book_id}")]
    BookNotFound { book_id: BookId },

    #[error("Reader not found: {reader_id}")]
    ReaderNotFound { reader_id: ReaderId },

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: UserId },

    #[error("User not found for email {email}")]
    UserEmailNotFound { email: String },

    // ===== Borrowing =====
    #[error("No copies available of book {book_id}")]
    NoCopiesAvailable { book_id: BookId },

    #[error("Reader {reader_name} has reached the limit of {limit} books")]
    BorrowLimitReached {
        reader_id: ReaderId,
        reader_name: String,
        limit: usize,
    },

    #[error("Reader {reader_id} already has book {book_id}")]
    AlreadyBorrowed { book_id: BookId, reader_id: ReaderId },

    #[error("Reader {reader_id} does not have book {book_id}")]
    NotBorrowed { book_id: BookId, reader_id: ReaderId },

    // ===== Deletion =====
    #[error("Cannot delete reader {reader_id}: {active_loans} books not returned")]
    ReaderHasActiveLoans {
        reader_id: ReaderId,
        active_loans: usize,
    },

    #[error("Cannot delete book {book_id}: it has borrow records")]
    BookHasBorrowRecords { book_id: BookId },

    // ===== Validation =====
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    // ===== Generic =====
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<LibraryError> for ExError {
    fn from(err: LibraryError) -> Self {
        match err {
            LibraryError::BookNotFound { book_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(format!("book:{}", book_id))
                .with_message("Book not found"),

            LibraryError::ReaderNotFound { reader_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(format!("reader:{}", reader_id))
                .with_message("Reader not found"),

            LibraryError::UserNotFound { user_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(format!("user:{}", user_id))
                .with_message("User not found"),

            LibraryError::UserEmailNotFound { email } => ExError::new(ExErrorKind::NotFound)
                .with_message(format!("User not found for email {}", email)),

            LibraryError::NoCopiesAvailable { book_id } => {
                ExError::new(ExErrorKind::NoCopiesAvailable)
                    .with_entity_id(format!("book:{}", book_id))
                    .with_message("No copies available")
            }

            LibraryError::BorrowLimitReached {
                reader_id,
                reader_name,
                limit,
            } => ExError::new(ExErrorKind::BorrowLimitReached)
                .with_entity_id(format!("reader:{}", reader_id))
                .with_message(format!(
                    "Reader {} has reached the limit of {} books",
                    reader_name, limit
                )),

            LibraryError::AlreadyBorrowed { book_id, reader_id } => {
                ExError::new(ExErrorKind::AlreadyBorrowed)
                    .with_entity_id(format!("reader:{}", reader_id))
                    .with_message(format!("Already borrowed: reader has book {}", book_id))
            }

            LibraryError::NotBorrowed { book_id, reader_id } => {
                ExError::new(ExErrorKind::NotBorrowed)
                    .with_entity_id(format!("reader:{}", reader_id))
                    .with_message(format!("Reader does not have book {}", book_id))
            }

            LibraryError::ReaderHasActiveLoans {
                reader_id,
                active_loans,
            } => ExError::new(ExErrorKind::CannotDelete)
                .with_entity_id(format!("reader:{}", reader_id))
                .with_message(format!(
                    "Cannot delete reader with books: {} not returned",
                    active_loans
                )),

            LibraryError::BookHasBorrowRecords { book_id } => {
                ExError::new(ExErrorKind::CannotDelete)
                    .with_entity_id(format!("book:{}", book_id))
                    .with_message("Cannot delete book with borrow records")
            }

            LibraryError::InvalidInput { field, reason } => ExError::new(ExErrorKind::InvalidInput)
                .with_message(format!("Invalid {}: {}", field, reason)),

            LibraryError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            LibraryError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::Serialization {
            message: err.to_string(),
        }
    }
}
