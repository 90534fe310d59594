/// Domain-level failures raised by business rules before storage is touched.
///
/// The API layer expresses each variant in the HTTP vocabulary before it
/// reaches the client.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Input failed field validation; the message lists the failing fields.
    #[error("Validation failed: {0}")]
    Validation(String),
}
