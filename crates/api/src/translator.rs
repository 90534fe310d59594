//! Single chokepoint that turns handler failures into client-facing errors.
//!
//! | Failure                        | Kind               | Status | Message                          |
//! |--------------------------------|--------------------|--------|----------------------------------|
//! | storage: unique violation      | `AlreadyExists`    | 409    | `Already Exist`                  |
//! | storage: foreign key violation | `InvalidReference` | 400    | `Foreign key constraint failed`  |
//! | storage: record not found      | `NotFound`         | 404    | `Not Found`                      |
//! | storage: anything else         | `StorageError`     | 500    | `Database error`                 |
//! | [`HttpError`]                  | `Passthrough`      | as-is  | as-is                            |
//! | anything else                  | `Unclassified`     | 500    | `Internal server error`          |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use keel_db::{StorageError, StorageErrorKind};

use crate::error::{AppError, HttpError};
use crate::response::Envelope;

/// Closed set of outward-facing error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    AlreadyExists,
    InvalidReference,
    NotFound,
    StorageError,
    Unclassified,
    /// The handler raised an [`HttpError`]; status and message are its own.
    Passthrough,
}

impl ErrorKind {
    /// Fixed status and message for every kind except [`ErrorKind::Passthrough`].
    pub fn fixed_response(self) -> Option<(StatusCode, &'static str)> {
        match self {
            Self::AlreadyExists => Some((StatusCode::CONFLICT, "Already Exist")),
            Self::InvalidReference => {
                Some((StatusCode::BAD_REQUEST, "Foreign key constraint failed"))
            }
            Self::NotFound => Some((StatusCode::NOT_FOUND, "Not Found")),
            Self::StorageError => Some((StatusCode::INTERNAL_SERVER_ERROR, "Database error")),
            Self::Unclassified => {
                Some((StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"))
            }
            Self::Passthrough => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AlreadyExists => "already_exists",
            Self::InvalidReference => "invalid_reference",
            Self::NotFound => "not_found",
            Self::StorageError => "storage_error",
            Self::Unclassified => "unclassified",
            Self::Passthrough => "passthrough",
        }
    }
}

impl From<StorageErrorKind> for ErrorKind {
    fn from(kind: StorageErrorKind) -> Self {
        match kind {
            StorageErrorKind::UniqueViolation => Self::AlreadyExists,
            StorageErrorKind::ForeignKeyViolation => Self::InvalidReference,
            StorageErrorKind::RecordNotFound => Self::NotFound,
            StorageErrorKind::Other => Self::StorageError,
        }
    }
}

/// A failure after classification: kind, status and the message the
/// client will see.
///
/// Renders as `{ "statusCode": <status>, "message": <message> }`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{status}: {message}")]
pub struct ClassifiedError {
    kind: ErrorKind,
    status: StatusCode,
    message: String,
}

impl ClassifiedError {
    fn fixed(kind: ErrorKind) -> Self {
        let (status, message) = kind
            .fixed_response()
            .unwrap_or((StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"));
        Self {
            kind,
            status,
            message: message.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<HttpError> for ClassifiedError {
    fn from(err: HttpError) -> Self {
        Self {
            kind: ErrorKind::Passthrough,
            status: err.status(),
            message: err.message().to_string(),
        }
    }
}

impl IntoResponse for ClassifiedError {
    fn into_response(self) -> Response {
        Envelope::<()>::with_message(self.status, self.message).into_response()
    }
}

/// Maps every [`AppError`] to exactly one [`ClassifiedError`].
pub struct ErrorTranslator;

impl ErrorTranslator {
    /// Classify `error`. Total: there is no input without an output kind.
    pub fn translate(error: AppError) -> ClassifiedError {
        match error {
            AppError::Storage(err) => Self::classify_storage(&err),
            AppError::Http(err) => err.into(),
            AppError::Internal(_) => ClassifiedError::fixed(ErrorKind::Unclassified),
        }
    }

    fn classify_storage(err: &StorageError) -> ClassifiedError {
        let kind = ErrorKind::from(err.kind());
        tracing::debug!(
            storage_kind = %err.kind(),
            code = err.code().unwrap_or("none"),
            constraint = err.constraint().unwrap_or("none"),
            classified_as = kind.as_str(),
            "Classified storage error",
        );
        ClassifiedError::fixed(kind)
    }
}
