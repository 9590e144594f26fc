//! User Service Client Library
//!
//! A thin facade over the generated `user.v1.UserService` client. It owns
//! connection setup (address, TLS, keep-alive) and applies a per-call
//! timeout to every RPC that does not already carry a deadline.

pub mod client;
pub mod config;
pub mod error;

pub use client::UserServiceClient;
pub use config::{ClientConfig, KeepAliveSettings, TlsSettings};
pub use error::{ClientError, ClientResult};
