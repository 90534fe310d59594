//! Base controller behaviour shared by every handler.
//!
//! Handlers hand their body to [`ResponseBuilder::wrap`] (or
//! [`ResponseBuilder::wrap_value`]) and return whatever it produces. On
//! success the outcome is normalized into an [`Envelope`]; on failure the
//! error is recorded through the injected [`FailureLog`] and then classified
//! by [`ErrorTranslator`].

use std::future::Future;
use std::sync::Arc;

use crate::error::AppError;
use crate::response::{Envelope, Outcome};
use crate::translator::{ClassifiedError, ErrorTranslator};

/// Sink for handler failures, called once per failure before translation.
pub trait FailureLog: Send + Sync {
    /// Record `error`. `context` names the handler when one was given.
    fn record_failure(&self, context: Option<&str>, error: &AppError);
}

/// [`FailureLog`] that emits one `tracing` error event per failure, with the
/// error message and its full source chain.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingFailureLog;

impl FailureLog for TracingFailureLog {
    fn record_failure(&self, context: Option<&str>, error: &AppError) {
        let chain = source_chain(error);
        tracing::error!(
            context = context.unwrap_or("handler"),
            error = %error,
            chain = ?chain,
            "Request handler failed",
        );
    }
}

/// Messages of every error in `error`'s source chain, outermost first.
pub fn source_chain(error: &(dyn std::error::Error + 'static)) -> Vec<String> {
    let mut chain = Vec::new();
    let mut source = error.source();
    while let Some(err) = source {
        chain.push(err.to_string());
        source = err.source();
    }
    chain
}

/// Runs handler bodies and shapes their results.
///
/// Cheap to clone; holds no per-request state.
#[derive(Clone)]
pub struct ResponseBuilder {
    log: Arc<dyn FailureLog>,
    context: Option<&'static str>,
}

impl ResponseBuilder {
    pub fn new(log: Arc<dyn FailureLog>) -> Self {
        Self { log, context: None }
    }

    /// A builder whose failure records carry `context`.
    pub fn in_context(&self, context: &'static str) -> Self {
        Self {
            log: Arc::clone(&self.log),
            context: Some(context),
        }
    }

    /// Run `handler` once and normalize its [`Outcome`].
    ///
    /// Failures are logged, then translated; the translated error is the
    /// only thing returned on the error path.
    pub async fn wrap<T, E, F, Fut>(&self, handler: F) -> Result<Envelope<T>, ClassifiedError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Outcome<T>, E>>,
        E: Into<AppError>,
    {
        match handler().await {
            Ok(outcome) => Ok(Envelope::normalize(outcome)),
            Err(err) => Err(self.fail(err.into())),
        }
    }

    /// [`wrap`](Self::wrap) for handlers that return a bare payload.
    pub async fn wrap_value<T, E, F, Fut>(
        &self,
        handler: F,
    ) -> Result<Envelope<T>, ClassifiedError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<AppError>,
    {
        self.wrap(|| async move { handler().await.map(Outcome::Value) })
            .await
    }

    /// Log and translate a failure raised outside of a handler body, such
    /// as an extractor rejection.
    pub fn reject(&self, error: impl Into<AppError>) -> ClassifiedError {
        self.fail(error.into())
    }

    fn fail(&self, error: AppError) -> ClassifiedError {
        self.log.record_failure(self.context, &error);
        ErrorTranslator::translate(error)
    }
}
