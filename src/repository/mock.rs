//! Mock repository implementation for isolating services in tests.

use mockall::mock;

use crate::domain::settings::{NewSettings, Settings};
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::repository::errors::RepositoryResult;
use crate::repository::{SettingsReader, SettingsWriter, UserListQuery, UserReader, UserWriter};

mock! {
    pub Repository {}

    impl UserReader for Repository {
        fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
        fn get_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;
        fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
        fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)>;
    }

    impl UserWriter for Repository {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn update_user(&self, user_id: i32, updates: &UpdateUser) -> RepositoryResult<User>;
        fn delete_user(&self, user_id: i32) -> RepositoryResult<()>;
    }

    impl SettingsReader for Repository {
        fn get_settings_by_user(&self, user_id: i32) -> RepositoryResult<Option<Settings>>;
    }

    impl SettingsWriter for Repository {
        fn create_settings(&self, new_settings: &NewSettings) -> RepositoryResult<Settings>;
    }
}
