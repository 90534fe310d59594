use axum::http::StatusCode;
use keel_core::error::CoreError;
use keel_db::StorageError;

/// An error already expressed in the HTTP vocabulary.
///
/// Handlers return this when they know the exact status and message the
/// client should see. The translator passes it through unchanged. `detail`
/// only appears in logs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{status}: {message}{}", render_detail(.detail))]
pub struct HttpError {
    status: StatusCode,
    message: String,
    detail: Option<String>,
}

fn render_detail(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(" ({d})"))
        .unwrap_or_default()
}

impl HttpError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            detail: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Attach a log-only explanation, e.g. the framework's rejection text.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

impl From<CoreError> for HttpError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::bad_request(msg),
        }
    }
}

/// Failure type for handler bodies run through
/// [`ResponseBuilder`](crate::controller::ResponseBuilder).
///
/// Every variant is classified by
/// [`ErrorTranslator`](crate::translator::ErrorTranslator) before it reaches
/// the client.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A persistence failure, tagged with its storage kind.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// An error the handler already expressed as status + message.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Anything else.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Storage(err.into())
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        AppError::Http(err.into())
    }
}
