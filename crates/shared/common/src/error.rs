//! Capability-provider error classification.
//!
//! Providers report failures as text. The boundary maps that text onto a
//! gRPC status code by substring match against a fixed, ordered table; the
//! first phrase found wins. Matching is case-sensitive. Anything that
//! matches no phrase becomes `Internal` with an `internal error: ` prefix.

use std::fmt::Display;

use tonic::{Code, Status};

/// Prefix added to messages that fall through to `Code::Internal`.
pub const INTERNAL_ERROR_PREFIX: &str = "internal error";

/// Ordered phrase table. Order matters: "user not found during validation"
/// is `NotFound`, not `InvalidArgument`.
const CLASSIFICATION_RULES: &[(&str, Code)] = &[
    ("not found", Code::NotFound),
    ("already exists", Code::AlreadyExists),
    ("invalid credentials", Code::Unauthenticated),
    ("insufficient rights", Code::PermissionDenied),
    ("validation", Code::InvalidArgument),
];

/// Classify an error message into a gRPC status code.
pub fn classify(message: &str) -> Code {
    CLASSIFICATION_RULES
        .iter()
        .find(|(phrase, _)| message.contains(phrase))
        .map(|(_, code)| *code)
        .unwrap_or(Code::Internal)
}

/// Convert a provider error into a gRPC `Status`.
///
/// Classified errors keep their original text; unclassified ones are
/// wrapped as `internal error: <text>`.
pub fn status_from_error<E: Display>(err: E) -> Status {
    let message = err.to_string();

    match classify(&message) {
        Code::Internal => {
            tracing::error!(error = %message, "Unclassified provider error");
            Status::internal(format!("{}: {}", INTERNAL_ERROR_PREFIX, message))
        }
        code => {
            tracing::debug!(?code, error = %message, "Provider error classified");
            Status::new(code, message)
        }
    }
}
