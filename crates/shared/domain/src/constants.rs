//! Domain-level constants.

// =============================================================================
// User Roles
// =============================================================================

/// Default role assigned to new users
pub const ROLE_USER: &str = "user";

/// Moderator role
pub const ROLE_MODERATOR: &str = "moderator";

/// Administrator role with elevated privileges
pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// Pagination
// =============================================================================

/// Page used when a listing request asks for page zero or below
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when a listing request asks for zero or fewer items
pub const DEFAULT_PAGE_SIZE: i64 = 10;
