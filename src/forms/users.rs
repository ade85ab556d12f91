use serde::Deserialize;
use validator::Validate;

use crate::domain::user::{NewUser, UpdateUser};

#[derive(Debug, Deserialize, Validate)]
/// Form data for creating a user.
///
/// Only the profile fields are validated here; credential rules are not
/// enforced when an administrator creates an account.
pub struct NewUserForm {
    #[validate(length(min = 1, message = "Username is required."))]
    pub username: String,
    #[validate(email(message = "Invalid email address."))]
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub password: String,
}

impl From<&NewUserForm> for NewUser {
    fn from(form: &NewUserForm) -> Self {
        NewUser::new(
            form.username.clone(),
            form.email.clone(),
            form.name.clone(),
            form.password.clone(),
        )
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Form data for updating an existing user.
pub struct EditUserForm {
    #[validate(length(min = 1, message = "Username is required."))]
    pub username: String,
    #[validate(email(message = "Invalid email address."))]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    /// Left empty to keep the current credentials.
    #[serde(default)]
    pub password: Option<String>,
}

impl From<&EditUserForm> for UpdateUser {
    fn from(form: &EditUserForm) -> Self {
        UpdateUser::new(
            form.username.clone(),
            form.email.clone(),
            form.name.clone(),
            form.enabled,
            form.password.clone(),
        )
    }
}

#[derive(Debug, Deserialize)]
/// Delete confirmation form. An unconfirmed submission is a no-op.
pub struct DeleteUserForm {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Default, Deserialize)]
/// Search form. The term arrives under the nested wire name used by the
/// search widget embedded in the layout.
pub struct SearchUserForm {
    #[serde(rename = "search_user[term]", default)]
    pub term: Option<String>,
}

impl SearchUserForm {
    /// The submitted term; an absent field is treated as an empty term.
    pub fn term(&self) -> &str {
        self.term.as_deref().unwrap_or("")
    }
}
