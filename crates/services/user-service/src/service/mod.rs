//! Capability interface implemented by the embedding application.

mod user_provider;

pub use user_provider::UserProvider;

#[cfg(any(test, feature = "test-utils"))]
pub use user_provider::MockUserProvider;
