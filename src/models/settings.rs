use diesel::prelude::*;

use crate::domain::settings::{NewSettings as DomainNewSettings, Settings as DomainSettings};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::settings)]
/// Diesel model for [`crate::domain::settings::Settings`].
pub struct Settings {
    pub id: i32,
    pub user_id: i32,
    pub items_per_page: i32,
    pub language: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::settings)]
/// Insertable form of [`Settings`].
pub struct NewSettings<'a> {
    pub user_id: i32,
    pub items_per_page: i32,
    pub language: &'a str,
}

impl From<Settings> for DomainSettings {
    fn from(settings: Settings) -> Self {
        Self {
            id: settings.id,
            user_id: settings.user_id,
            items_per_page: settings.items_per_page,
            language: settings.language,
        }
    }
}

impl<'a> From<&'a DomainNewSettings> for NewSettings<'a> {
    fn from(settings: &'a DomainNewSettings) -> Self {
        Self {
            user_id: settings.user_id,
            items_per_page: settings.items_per_page,
            language: &settings.language,
        }
    }
}
