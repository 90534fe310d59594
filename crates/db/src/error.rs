//! Storage-layer failures tagged with a closed [`StorageErrorKind`].
//!
//! The kind is decided once, when the error is built from a `sqlx::Error`
//! (or from a bare provider code), so callers classify failures with a
//! plain `match` and never inspect provider error codes themselves.

use std::fmt;

/// PostgreSQL SQLSTATE `unique_violation`.
pub const PG_UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL SQLSTATE `foreign_key_violation`.
pub const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

/// Prisma query-engine error codes: `P2002` unique constraint, `P2003` foreign
/// key constraint, `P2001`/`P2025` required record not found.
pub const ENGINE_UNIQUE_VIOLATION: &str = "P2002";
pub const ENGINE_FOREIGN_KEY_VIOLATION: &str = "P2003";
pub const ENGINE_RECORD_MISSING: &str = "P2001";
pub const ENGINE_RECORD_NOT_FOUND: &str = "P2025";

/// Closed set of storage failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageErrorKind {
    /// A unique constraint rejected the write.
    UniqueViolation,
    /// A foreign key pointed at a row that does not exist.
    ForeignKeyViolation,
    /// A required record was missing or no record matched the query.
    RecordNotFound,
    /// Any other storage failure (connectivity, syntax, unknown codes, ...).
    Other,
}

impl StorageErrorKind {
    /// Map a provider error code to its kind. Unknown codes are [`Self::Other`].
    pub fn from_code(code: &str) -> Self {
        match code {
            PG_UNIQUE_VIOLATION | ENGINE_UNIQUE_VIOLATION => Self::UniqueViolation,
            PG_FOREIGN_KEY_VIOLATION | ENGINE_FOREIGN_KEY_VIOLATION => Self::ForeignKeyViolation,
            ENGINE_RECORD_MISSING | ENGINE_RECORD_NOT_FOUND => Self::RecordNotFound,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for StorageErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UniqueViolation => "unique violation",
            Self::ForeignKeyViolation => "foreign key violation",
            Self::RecordNotFound => "record not found",
            Self::Other => "storage error",
        };
        f.write_str(name)
    }
}

/// A failure raised by the persistence layer.
///
/// `code` and `constraint` are kept for logs only; they must never be
/// copied into a client-facing response.
#[derive(Debug, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct StorageError {
    kind: StorageErrorKind,
    code: Option<String>,
    constraint: Option<String>,
    message: String,
    #[source]
    source: Option<sqlx::Error>,
}

/// Convenience alias for repository return values.
pub type StorageResult<T> = Result<T, StorageError>;

impl StorageError {
    /// Build an error from a provider code reported outside of sqlx.
    pub fn from_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            kind: StorageErrorKind::from_code(&code),
            code: Some(code),
            constraint: None,
            message: message.into(),
            source: None,
        }
    }

    /// A query that was required to match a row matched none.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: StorageErrorKind::RecordNotFound,
            code: None,
            constraint: None,
            message: message.into(),
            source: None,
        }
    }

    pub fn kind(&self) -> StorageErrorKind {
        self.kind
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn constraint(&self) -> Option<&str> {
        self.constraint.as_deref()
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        let (kind, code, constraint) = match &err {
            sqlx::Error::RowNotFound => (StorageErrorKind::RecordNotFound, None, None),
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.into_owned());
                let kind = code
                    .as_deref()
                    .map_or(StorageErrorKind::Other, StorageErrorKind::from_code);
                (kind, code, db_err.constraint().map(str::to_owned))
            }
            _ => (StorageErrorKind::Other, None, None),
        };

        Self {
            kind,
            code,
            constraint,
            message: err.to_string(),
            source: Some(err),
        }
    }
}
