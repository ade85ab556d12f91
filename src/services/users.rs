//! Services implementing the user administration workflows.

use validator::Validate;

use crate::domain::user::{NewUser, UpdateUser, User};
use crate::dto::users::{DeleteOutcome, ListOutcome, UsersPage};
use crate::forms::users::{DeleteUserForm, EditUserForm, NewUserForm, SearchUserForm};
use crate::forms::{FieldErrors, field_errors};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{UserListQuery, UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};

/// Loads the requested window of the full user collection.
pub fn list_users<R>(repo: &R, page: usize) -> ServiceResult<ListOutcome>
where
    R: UserReader + ?Sized,
{
    let query = UserListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);
    resolve_page(repo, query, page, None)
}

/// Runs a submitted search and loads the requested window of the matches.
pub fn search_users<R>(repo: &R, form: &SearchUserForm, page: usize) -> ServiceResult<ListOutcome>
where
    R: UserReader + ?Sized,
{
    log::info!("searching users");

    let term = form.term().trim().to_string();
    let query = UserListQuery::new()
        .search(term.clone())
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);

    resolve_page(repo, query, page, Some(term))
}

/// Resolves the requested page number against the query results.
///
/// Requests beyond the last page are reported as out of range only when the
/// requested page is greater than 1; page 1 of an empty collection renders
/// as an empty page.
fn resolve_page<R>(
    repo: &R,
    query: UserListQuery,
    page: usize,
    search_term: Option<String>,
) -> ServiceResult<ListOutcome>
where
    R: UserReader + ?Sized,
{
    let page = if page == 0 { 1 } else { page };

    let (total, users) = repo.list_users(query).map_err(ServiceError::from)?;
    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);

    if page > total_pages && page > 1 {
        return Ok(ListOutcome::OutOfRange {
            last_page: total_pages.max(1),
        });
    }

    Ok(ListOutcome::Page(UsersPage {
        users: Paginated::new(users, page, total_pages),
        search_term,
    }))
}

/// Validates the creation form and persists a new, enabled user.
///
/// Only profile rules apply here: the username must be present and unique,
/// the email well-formed and unique. Credential rules are not enforced.
pub fn create_user<R>(repo: &R, form: &NewUserForm) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    let mut errors = match form.validate() {
        Ok(()) => FieldErrors::new(),
        Err(e) => field_errors(&e),
    };

    let new_user = NewUser::from(form);

    if !new_user.username.is_empty()
        && repo
            .get_user_by_username(&new_user.username)
            .map_err(ServiceError::from)?
            .is_some()
    {
        errors
            .entry("username".to_string())
            .or_default()
            .push("Already in use.".to_string());
    }
    if !new_user.email.is_empty()
        && repo
            .get_user_by_email(&new_user.email)
            .map_err(ServiceError::from)?
            .is_some()
    {
        errors
            .entry("email".to_string())
            .or_default()
            .push("Already in use.".to_string());
    }

    if !errors.is_empty() {
        return Err(ServiceError::Validation(errors));
    }

    repo.create_user(&new_user).map_err(ServiceError::from)
}

/// Loads the user shown on the edit page.
pub fn load_user<R>(repo: &R, user_id: i32) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    repo.get_user_by_id(user_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Validates the edit form and persists the mutations.
pub fn update_user<R>(repo: &R, user_id: i32, form: &EditUserForm) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    let current = load_user(repo, user_id)?;

    let mut errors = match form.validate() {
        Ok(()) => FieldErrors::new(),
        Err(e) => field_errors(&e),
    };

    let updates = UpdateUser::from(form);

    if let Some(existing) = repo
        .get_user_by_username(&updates.username)
        .map_err(ServiceError::from)?
    {
        if existing.id != current.id {
            errors
                .entry("username".to_string())
                .or_default()
                .push("Already in use.".to_string());
        }
    }
    if let Some(existing) = repo
        .get_user_by_email(&updates.email)
        .map_err(ServiceError::from)?
    {
        if existing.id != current.id {
            errors
                .entry("email".to_string())
                .or_default()
                .push("Already in use.".to_string());
        }
    }

    if !errors.is_empty() {
        return Err(ServiceError::Validation(errors));
    }

    repo.update_user(current.id, &updates)
        .map_err(ServiceError::from)
}

/// Processes a delete confirmation for the given user.
///
/// An unconfirmed submission performs no mutation; the caller redirects to
/// the listing either way. An unknown identifier is a not-found failure.
pub fn delete_user<R>(repo: &R, user_id: i32, form: &DeleteUserForm) -> ServiceResult<DeleteOutcome>
where
    R: UserReader + UserWriter + ?Sized,
{
    let user = load_user(repo, user_id)?;

    if !form.confirm {
        return Ok(DeleteOutcome::Skipped);
    }

    repo.delete_user(user.id).map_err(ServiceError::from)?;

    Ok(DeleteOutcome::Deleted {
        username: user.username,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;

    fn stored_user(id: i32, username: &str) -> User {
        User {
            id,
            username: username.to_string(),
            email: format!("{username}@example.com"),
            ..User::default()
        }
    }

    fn valid_form() -> NewUserForm {
        NewUserForm {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            name: "Alice".to_string(),
            password: "secret".to_string(),
        }
    }

    #[test]
    fn list_page_one_of_empty_collection_renders_empty() {
        let mut repo = MockRepository::new();
        repo.expect_list_users().returning(|_| Ok((0, vec![])));

        match list_users(&repo, 1).unwrap() {
            ListOutcome::Page(page) => {
                assert!(page.users.items.is_empty());
                assert_eq!(page.users.page, 1);
            }
            ListOutcome::OutOfRange { .. } => panic!("page 1 must never be out of range"),
        }
    }

    #[test]
    fn list_past_the_end_reports_last_page() {
        let mut repo = MockRepository::new();
        // 120 users -> 3 pages of 50.
        repo.expect_list_users().returning(|_| Ok((120, vec![])));

        match list_users(&repo, 7).unwrap() {
            ListOutcome::OutOfRange { last_page } => assert_eq!(last_page, 3),
            ListOutcome::Page(_) => panic!("page 7 of 3 must be out of range"),
        }
    }

    #[test]
    fn list_past_the_end_of_empty_collection_falls_back_to_page_one() {
        let mut repo = MockRepository::new();
        repo.expect_list_users().returning(|_| Ok((0, vec![])));

        match list_users(&repo, 2).unwrap() {
            ListOutcome::OutOfRange { last_page } => assert_eq!(last_page, 1),
            ListOutcome::Page(_) => panic!("page 2 of 0 must be out of range"),
        }
    }

    #[test]
    fn search_passes_trimmed_term_to_the_query() {
        let mut repo = MockRepository::new();
        repo.expect_list_users()
            .withf(|query| query.search.as_deref() == Some("alice"))
            .returning(|_| Ok((1, vec![stored_user(1, "alice")])));

        let form = SearchUserForm {
            term: Some("  alice ".to_string()),
        };
        match search_users(&repo, &form, 1).unwrap() {
            ListOutcome::Page(page) => {
                assert_eq!(page.search_term.as_deref(), Some("alice"));
                assert_eq!(page.users.items.len(), 1);
            }
            ListOutcome::OutOfRange { .. } => panic!("one match fits on page 1"),
        }
    }

    #[test]
    fn create_user_persists_enabled_user() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_username().returning(|_| Ok(None));
        repo.expect_get_user_by_email().returning(|_| Ok(None));
        repo.expect_create_user()
            .withf(|new_user| new_user.enabled)
            .times(1)
            .returning(|new_user| {
                let mut user = stored_user(1, &new_user.username);
                user.enabled = new_user.enabled;
                Ok(user)
            });

        let user = create_user(&repo, &valid_form()).unwrap();
        assert!(user.enabled);
        assert_eq!(user.id, 1);
    }

    #[test]
    fn create_user_rejects_invalid_profile_without_persisting() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_username().returning(|_| Ok(None));
        repo.expect_get_user_by_email().returning(|_| Ok(None));
        repo.expect_create_user().times(0);

        let form = NewUserForm {
            username: String::new(),
            email: "nope".to_string(),
            name: String::new(),
            password: "secret".to_string(),
        };
        match create_user(&repo, &form) {
            Err(ServiceError::Validation(errors)) => {
                assert!(errors.contains_key("username"));
                assert!(errors.contains_key("email"));
            }
            _ => panic!("expected validation errors"),
        }
    }

    #[test]
    fn create_user_rejects_taken_username() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_username()
            .returning(|username| Ok(Some(stored_user(7, username))));
        repo.expect_get_user_by_email().returning(|_| Ok(None));
        repo.expect_create_user().times(0);

        match create_user(&repo, &valid_form()) {
            Err(ServiceError::Validation(errors)) => assert!(errors.contains_key("username")),
            _ => panic!("expected validation errors"),
        }
    }

    #[test]
    fn update_user_reports_unknown_id_as_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id().returning(|_| Ok(None));

        let form = EditUserForm {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            name: String::new(),
            enabled: true,
            password: None,
        };
        assert!(matches!(
            update_user(&repo, 42, &form),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn update_user_allows_keeping_own_username() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id()
            .returning(|id| Ok(Some(stored_user(id, "alice"))));
        repo.expect_get_user_by_username()
            .returning(|username| Ok(Some(stored_user(3, username))));
        repo.expect_get_user_by_email()
            .returning(|_| Ok(Some(stored_user(3, "alice"))));
        repo.expect_update_user()
            .times(1)
            .returning(|id, updates| {
                let mut user = stored_user(id, &updates.username);
                user.enabled = updates.enabled;
                Ok(user)
            });

        let form = EditUserForm {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            name: String::new(),
            enabled: false,
            password: None,
        };
        let user = update_user(&repo, 3, &form).unwrap();
        assert!(!user.enabled);
    }

    #[test]
    fn delete_without_confirmation_is_a_noop() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id()
            .returning(|id| Ok(Some(stored_user(id, "alice"))));
        repo.expect_delete_user().times(0);

        let outcome = delete_user(&repo, 3, &DeleteUserForm { confirm: false }).unwrap();
        assert!(matches!(outcome, DeleteOutcome::Skipped));
    }

    #[test]
    fn delete_with_confirmation_removes_the_user() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id()
            .returning(|id| Ok(Some(stored_user(id, "alice"))));
        repo.expect_delete_user().times(1).returning(|_| Ok(()));

        match delete_user(&repo, 3, &DeleteUserForm { confirm: true }).unwrap() {
            DeleteOutcome::Deleted { username } => assert_eq!(username, "alice"),
            DeleteOutcome::Skipped => panic!("confirmed delete must remove the user"),
        }
    }

    #[test]
    fn delete_of_unknown_id_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id().returning(|_| Ok(None));

        assert!(matches!(
            delete_user(&repo, 42, &DeleteUserForm { confirm: true }),
            Err(ServiceError::NotFound)
        ));
    }
}
