use user_admin::domain::settings::NewSettings;
use user_admin::domain::user::{NewUser, UpdateUser};
use user_admin::repository::errors::RepositoryError;
use user_admin::repository::{
    DieselRepository, SettingsReader, SettingsWriter, UserListQuery, UserReader, UserWriter,
};

mod common;

fn new_user(username: &str) -> NewUser {
    NewUser::new(
        username.to_string(),
        format!("{username}@example.com"),
        username.to_string(),
        "secret".to_string(),
    )
}

#[test]
fn test_user_repository_crud() {
    let test_db = common::TestDb::new("test_user_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let alice = repo.create_user(&new_user("alice")).unwrap();
    let bob = repo.create_user(&new_user("bob")).unwrap();
    assert!(alice.enabled);
    assert!(alice.id < bob.id);

    let (total, items) = repo.list_users(UserListQuery::new()).unwrap();
    assert_eq!(total, 2);
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].username, "alice");

    let by_username = repo.get_user_by_username("bob").unwrap().unwrap();
    assert_eq!(by_username.id, bob.id);
    let by_email = repo.get_user_by_email("alice@example.com").unwrap().unwrap();
    assert_eq!(by_email.id, alice.id);

    let updates = UpdateUser::new(
        "bobby".to_string(),
        "bobby@example.com".to_string(),
        "Bobby".to_string(),
        false,
        None,
    );
    let updated = repo.update_user(bob.id, &updates).unwrap();
    assert_eq!(updated.username, "bobby");
    assert!(!updated.enabled);

    repo.delete_user(alice.id).unwrap();
    assert!(repo.get_user_by_id(alice.id).unwrap().is_none());

    let (total_after, items_after) = repo.list_users(UserListQuery::new()).unwrap();
    assert_eq!(total_after, 1);
    assert_eq!(items_after[0].username, "bobby");
}

#[test]
fn test_update_unknown_user_is_not_found() {
    let test_db = common::TestDb::new("test_update_unknown_user.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let updates = UpdateUser::new(
        "ghost".to_string(),
        "ghost@example.com".to_string(),
        String::new(),
        true,
        None,
    );
    assert!(matches!(
        repo.update_user(42, &updates),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_duplicate_username_is_a_constraint_violation() {
    let test_db = common::TestDb::new("test_duplicate_username.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    repo.create_user(&new_user("alice")).unwrap();
    let mut duplicate = new_user("alice");
    duplicate.email = "other@example.com".to_string();

    assert!(matches!(
        repo.create_user(&duplicate),
        Err(RepositoryError::ConstraintViolation(_))
    ));
}

#[test]
fn test_list_users_pagination_windows() {
    let test_db = common::TestDb::new("test_list_users_pagination.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    for i in 0..5 {
        repo.create_user(&new_user(&format!("user{i}"))).unwrap();
    }

    let (total, first) = repo
        .list_users(UserListQuery::new().paginate(1, 2))
        .unwrap();
    assert_eq!(total, 5);
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].username, "user0");

    let (_, third) = repo
        .list_users(UserListQuery::new().paginate(3, 2))
        .unwrap();
    assert_eq!(third.len(), 1);
    assert_eq!(third[0].username, "user4");

    let (_, past_the_end) = repo
        .list_users(UserListQuery::new().paginate(4, 2))
        .unwrap();
    assert!(past_the_end.is_empty());
}

#[test]
fn test_search_matches_username_and_email() {
    let test_db = common::TestDb::new("test_search_users.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    repo.create_user(&new_user("alice")).unwrap();
    repo.create_user(&new_user("bob")).unwrap();

    let (total, items) = repo
        .list_users(UserListQuery::new().search("ali"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].username, "alice");

    // Substring of the email domain matches every user.
    let (total, _) = repo
        .list_users(UserListQuery::new().search("example.com"))
        .unwrap();
    assert_eq!(total, 2);

    let (total, items) = repo
        .list_users(UserListQuery::new().search("nobody"))
        .unwrap();
    assert_eq!(total, 0);
    assert!(items.is_empty());
}

#[test]
fn test_settings_repository_provisioning() {
    let test_db = common::TestDb::new("test_settings_repository.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let user = repo.create_user(&new_user("alice")).unwrap();
    assert!(repo.get_settings_by_user(user.id).unwrap().is_none());

    let settings = repo
        .create_settings(&NewSettings::default_for(user.id))
        .unwrap();
    assert_eq!(settings.user_id, user.id);
    assert_eq!(settings.items_per_page, 50);
    assert_eq!(settings.language, "en");

    repo.delete_user(user.id).unwrap();
    assert!(repo.get_settings_by_user(user.id).unwrap().is_none());
}
