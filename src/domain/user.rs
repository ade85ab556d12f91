use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An administrable account.
///
/// The password hash is kept out of this struct on purpose: it is owned by the
/// persistence layer and never reaches a template or the API.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub name: String,
    pub enabled: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub name: String,
    pub password: String,
    pub enabled: bool,
}

impl NewUser {
    /// Normalizes the submitted values. Accounts are enabled by default.
    #[must_use]
    pub fn new(username: String, email: String, name: String, password: String) -> Self {
        Self {
            username: username.trim().to_string(),
            email: email.trim().to_lowercase(),
            name: name.trim().to_string(),
            password,
            enabled: true,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateUser {
    pub username: String,
    pub email: String,
    pub name: String,
    pub enabled: bool,
    /// `None` keeps the stored credentials untouched.
    pub password: Option<String>,
}

impl UpdateUser {
    #[must_use]
    pub fn new(
        username: String,
        email: String,
        name: String,
        enabled: bool,
        password: Option<String>,
    ) -> Self {
        Self {
            username: username.trim().to_string(),
            email: email.trim().to_lowercase(),
            name: name.trim().to_string(),
            enabled,
            password: password.filter(|p| !p.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_is_enabled_and_normalized() {
        let user = NewUser::new(
            "  alice ".to_string(),
            " Alice@Example.COM ".to_string(),
            " Alice ".to_string(),
            "secret".to_string(),
        );
        assert!(user.enabled);
        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.name, "Alice");
    }

    #[test]
    fn update_user_drops_empty_password() {
        let update = UpdateUser::new(
            "alice".to_string(),
            "alice@example.com".to_string(),
            "Alice".to_string(),
            false,
            Some(String::new()),
        );
        assert_eq!(update.password, None);
        assert!(!update.enabled);
    }
}
