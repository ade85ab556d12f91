//! Services backing the JSON API endpoints.

use crate::dto::api::{UsersQuery, UsersResponse};
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::repository::{UserListQuery, UserReader};
use crate::services::{ServiceError, ServiceResult};

/// Returns the filtered list of users for API consumers.
pub fn list_users<R>(repo: &R, params: UsersQuery) -> ServiceResult<UsersResponse>
where
    R: UserReader + ?Sized,
{
    let mut query = UserListQuery::new();

    if let Some(page) = params.page {
        query = query.paginate(page, DEFAULT_ITEMS_PER_PAGE);
    }

    let search = params
        .search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    if let Some(term) = search {
        query = query.search(term);
    }

    let (total, users) = repo.list_users(query).map_err(ServiceError::from)?;

    Ok(UsersResponse { total, users })
}
