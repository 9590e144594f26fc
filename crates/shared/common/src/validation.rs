//! Field-presence checks for incoming requests.

use thiserror::Error;
use tonic::Status;

/// One or more required request fields were empty.
///
/// Carries a fixed, caller-chosen message; it always maps to
/// `Code::InvalidArgument`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FieldError {
    message: &'static str,
    missing: Vec<&'static str>,
}

impl FieldError {
    /// Names of the fields that were empty, in the order they were checked
    pub fn missing(&self) -> &[&'static str] {
        &self.missing
    }
}

impl From<FieldError> for Status {
    fn from(err: FieldError) -> Self {
        tracing::debug!(missing = ?err.missing, "Rejected request with missing fields");
        Status::invalid_argument(err.message)
    }
}

/// Require every `(name, value)` pair to have a non-empty value.
pub fn require_fields(
    fields: &[(&'static str, &str)],
    message: &'static str,
) -> Result<(), FieldError> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(FieldError { message, missing })
    }
}
