//! Domain layer - User account value objects.
//!
//! This crate contains the value objects exchanged with the user capability
//! provider. It has no transport dependencies; the gRPC boundary converts
//! to and from these types.

pub mod constants;
pub mod error;
pub mod pagination;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use pagination::PaginatedUsers;
pub use user::{CreateUser, UpdatePassword, UpdateUser, User, UserRole};
