//! Common utilities shared across the gRPC boundary.
//!
//! This crate provides:
//! - Conversions between domain value objects and `user.v1` messages
//! - Classification of capability-provider errors into gRPC status codes
//! - Field-presence checks run before a request is delegated

pub mod convert;
pub mod error;
pub mod validation;

pub use error::{classify, status_from_error, INTERNAL_ERROR_PREFIX};
pub use validation::{require_fields, FieldError};
