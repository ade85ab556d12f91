use serde::{Deserialize, Serialize};

/// Per-user preferences provisioned when an account is created.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub id: i32,
    pub user_id: i32,
    pub items_per_page: i32,
    pub language: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewSettings {
    pub user_id: i32,
    pub items_per_page: i32,
    pub language: String,
}

impl NewSettings {
    /// Defaults applied by the user-created provisioner.
    #[must_use]
    pub fn default_for(user_id: i32) -> Self {
        Self {
            user_id,
            items_per_page: 50,
            language: "en".to_string(),
        }
    }
}
