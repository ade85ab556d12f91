use diesel::prelude::*;

use crate::domain::settings::{NewSettings, Settings};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, SettingsReader, SettingsWriter};

impl SettingsReader for DieselRepository {
    fn get_settings_by_user(&self, user_id: i32) -> RepositoryResult<Option<Settings>> {
        use crate::models::settings::Settings as DbSettings;
        use crate::schema::settings;

        let mut conn = self.conn()?;
        let row = settings::table
            .filter(settings::user_id.eq(user_id))
            .first::<DbSettings>(&mut conn)
            .optional()?;

        Ok(row.map(Into::into))
    }
}

impl SettingsWriter for DieselRepository {
    fn create_settings(&self, new_settings: &NewSettings) -> RepositoryResult<Settings> {
        use crate::models::settings::{NewSettings as DbNewSettings, Settings as DbSettings};
        use crate::schema::settings;

        let mut conn = self.conn()?;
        let insertable: DbNewSettings = new_settings.into();
        let created = diesel::insert_into(settings::table)
            .values(&insertable)
            .get_result::<DbSettings>(&mut conn)?;

        Ok(created.into())
    }
}
