//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Default page size for list endpoints.
pub const DEFAULT_LIST_LIMIT: usize = 100;

/// Hard cap on list page size.
pub const MAX_LIST_LIMIT: usize = 500;

/// Clamp a requested limit into `1..=MAX_LIST_LIMIT`, defaulting when absent.
pub fn clamp_limit(limit: Option<usize>) -> usize {
    limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT)
}

/// `?status=&limit=` for admin list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
    pub limit: Option<usize>,
}
