//! gRPC protocol buffer definitions.
//!
//! This crate contains the generated `user.v1.UserService` definitions:
//! account CRUD, paginated listing, login, role and password changes.

/// User service definitions (`user.v1`).
pub mod user {
    tonic::include_proto!("user.v1");
}

// Re-export commonly used items
pub use user::user_service_client::UserServiceClient;
pub use user::user_service_server::{UserService, UserServiceServer};
