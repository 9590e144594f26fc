//! Conversions between domain value objects and `user.v1` messages.
//!
//! Role conversion is deliberately lopsided: decoding is lenient (anything
//! unknown becomes `UserRole::User`), encoding is strict (anything that is
//! not a named role becomes `ROLE_UNSPECIFIED`).

use chrono::{DateTime, TimeZone, Utc};
use prost_types::Timestamp;

use domain::{PaginatedUsers, User, UserRole};
use proto::user::{self as pb, Role};

/// Convert domain role to proto role value.
pub fn role_to_proto(role: &UserRole) -> i32 {
    let role = match role {
        UserRole::User => Role::User,
        UserRole::Moderator => Role::Moderator,
        UserRole::Admin => Role::Admin,
        UserRole::Unrecognized(_) => Role::Unspecified,
    };
    role as i32
}

/// Convert proto role value to domain role.
pub fn role_from_proto(value: i32) -> UserRole {
    match Role::try_from(value) {
        Ok(Role::Moderator) => UserRole::Moderator,
        Ok(Role::Admin) => UserRole::Admin,
        Ok(Role::User) | Ok(Role::Unspecified) | Err(_) => UserRole::User,
    }
}

pub fn timestamp_to_proto(dt: &DateTime<Utc>) -> Timestamp {
    Timestamp {
        seconds: dt.timestamp(),
        nanos: dt.timestamp_subsec_nanos() as i32,
    }
}

/// Out-of-range timestamps decode to `None`.
pub fn timestamp_from_proto(ts: &Timestamp) -> Option<DateTime<Utc>> {
    let nanos = u32::try_from(ts.nanos).ok()?;
    Utc.timestamp_opt(ts.seconds, nanos).single()
}

/// Convert domain User to proto User.
pub fn user_to_proto(user: &User) -> pb::User {
    pb::User {
        id: user.id.clone(),
        email: user.email.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        role: role_to_proto(&user.role),
        created_at: Some(timestamp_to_proto(&user.created_at)),
        updated_at: Some(timestamp_to_proto(&user.updated_at)),
        deleted_at: user.deleted_at.as_ref().map(timestamp_to_proto),
        rating: user.rating,
    }
}

/// Convert proto User to domain User.
///
/// Missing or out-of-range `created_at`/`updated_at` decode to the Unix
/// epoch; a missing `deleted_at` means the user is active.
pub fn user_from_proto(user: pb::User) -> User {
    let decode = |ts: Option<Timestamp>| ts.as_ref().and_then(timestamp_from_proto);

    User {
        id: user.id,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        role: role_from_proto(user.role),
        created_at: decode(user.created_at).unwrap_or_default(),
        updated_at: decode(user.updated_at).unwrap_or_default(),
        deleted_at: decode(user.deleted_at),
        rating: user.rating,
    }
}

/// Convert a provider page to the GetUsers response.
pub fn page_to_proto(page: &PaginatedUsers) -> pb::GetUsersResponse {
    pb::GetUsersResponse {
        users: page.users.iter().map(user_to_proto).collect(),
        total: page.total,
        page: page.page,
        page_size: page.page_size,
        total_pages: page.total_pages,
    }
}

/// Convert a GetUsers response back into a domain page.
pub fn page_from_proto(page: pb::GetUsersResponse) -> PaginatedUsers {
    PaginatedUsers {
        users: page.users.into_iter().map(user_from_proto).collect(),
        total: page.total,
        page: page.page,
        page_size: page.page_size,
        total_pages: page.total_pages,
    }
}
