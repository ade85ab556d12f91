//! DTOs exposed by the JSON API endpoints.

use crate::domain::user::User;

/// Query parameters accepted by the `/api/v1/users` service.
#[derive(Debug, Default)]
pub struct UsersQuery {
    /// Optional free-form search string applied to the user list.
    pub search: Option<String>,
    /// Optional page number for pagination.
    pub page: Option<usize>,
}

/// Result payload returned by [`crate::services::api::list_users`].
#[derive(Debug)]
pub struct UsersResponse {
    /// Total number of users matching the filter.
    pub total: usize,
    /// Page of users requested by the caller.
    pub users: Vec<User>,
}
