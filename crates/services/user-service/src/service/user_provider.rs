//! User capability provider trait.
//!
//! The gRPC adapter owns no user data. Every call is forwarded to an
//! implementation of this trait supplied by the embedding application,
//! which is also the only source of the errors the adapter classifies.

use async_trait::async_trait;

use domain::{CreateUser, DomainResult, PaginatedUsers, UpdatePassword, UpdateUser, User, UserRole};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User management business logic, implemented elsewhere.
///
/// Implementations must be safe to call from concurrent requests.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserProvider: Send + Sync {
    /// Create a new user account
    async fn create_user(&self, input: CreateUser) -> DomainResult<User>;

    /// Fetch a user by identifier
    async fn get_user_by_id(&self, id: &str) -> DomainResult<User>;

    /// Fetch a user by email address
    async fn get_user_by_email(&self, email: &str) -> DomainResult<User>;

    /// Apply a partial update; `None` fields are left unchanged
    async fn update_user(&self, id: &str, input: UpdateUser) -> DomainResult<User>;

    /// Delete a user on behalf of an actor
    async fn delete_user(&self, id: &str, actor_id: &str, actor_role: UserRole)
        -> DomainResult<()>;

    /// List one page of users. `page` and `page_size` are always positive.
    async fn list_users(&self, page: i64, page_size: i64) -> DomainResult<PaginatedUsers>;

    /// Authenticate and return an opaque session token
    async fn login(&self, email: &str, password: &str) -> DomainResult<String>;

    /// Change a user's role on behalf of an actor
    async fn update_user_role(
        &self,
        id: &str,
        role: UserRole,
        actor_role: UserRole,
    ) -> DomainResult<()>;

    /// Change a user's password after checking the current one
    async fn update_password(&self, id: &str, input: UpdatePassword) -> DomainResult<()>;
}
