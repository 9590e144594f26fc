//! Paginated listing result.

use serde::{Deserialize, Serialize};

use crate::user::User;

/// One page of users as reported by the capability provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaginatedUsers {
    pub users: Vec<User>,
    /// Total number of users across all pages
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl PaginatedUsers {
    /// Build a page, deriving `total_pages` from `total` and `page_size`.
    pub fn new(users: Vec<User>, total: i64, page: i64, page_size: i64) -> Self {
        let total_pages = if page_size <= 0 || total <= 0 {
            0
        } else {
            (total - 1) / page_size + 1
        };

        Self {
            users,
            total,
            page,
            page_size,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        let page = PaginatedUsers::new(Vec::new(), 21, 1, 10);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_total_pages_exact_and_empty() {
        assert_eq!(PaginatedUsers::new(Vec::new(), 20, 2, 10).total_pages, 2);
        assert_eq!(PaginatedUsers::new(Vec::new(), 0, 1, 10).total_pages, 0);
        assert_eq!(PaginatedUsers::new(Vec::new(), 5, 1, 0).total_pages, 0);
    }

    #[test]
    fn test_total_pages_extreme_totals() {
        assert_eq!(
            PaginatedUsers::new(Vec::new(), i64::MAX, 1, 10).total_pages,
            i64::MAX / 10 + 1
        );
        assert_eq!(
            PaginatedUsers::new(Vec::new(), i64::MAX, 1, 1).total_pages,
            i64::MAX
        );
        assert_eq!(PaginatedUsers::new(Vec::new(), -7, 1, 10).total_pages, 0);
    }
}
