//! Bridges `validator` derive output into [`CoreError`].

use validator::{Validate, ValidationErrors};

use crate::error::CoreError;

/// Run `validator` checks on `input`, mapping failures to
/// [`CoreError::Validation`].
pub fn validate<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::Validation(describe(&errors)))
}

/// Flatten field errors into a stable, human-readable message such as
/// `"email: invalid; username: length"`.
///
/// Fields are sorted so the message does not depend on hash-map order.
fn describe(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let codes: Vec<&str> = errs.iter().map(|e| e.code.as_ref()).collect();
            format!("{field}: {}", codes.join(", "))
        })
        .collect();
    parts.sort();
    parts.join("; ")
}
