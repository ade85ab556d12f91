use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::user::{NewUser, UpdateUser, User};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, UserListQuery, UserReader, UserWriter};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>> {
        use crate::models::user::User as DbUser;
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table.find(id).first::<DbUser>(&mut conn).optional()?;

        Ok(user.map(Into::into))
    }

    fn get_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        use crate::models::user::User as DbUser;
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::username.eq(username))
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(Into::into))
    }

    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        use crate::models::user::User as DbUser;
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::email.eq(email))
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(Into::into))
    }

    fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)> {
        use crate::models::user::User as DbUser;
        use crate::schema::users;

        let mut conn = self.conn()?;

        let pattern = query.search.as_ref().map(|term| format!("%{term}%"));

        let mut count_query = users::table.into_boxed::<Sqlite>();
        if let Some(pattern) = &pattern {
            count_query = count_query.filter(
                users::username
                    .like(pattern.clone())
                    .or(users::email.like(pattern.clone())),
            );
        }
        let total: i64 = count_query.count().get_result(&mut conn)?;

        let mut items_query = users::table.into_boxed::<Sqlite>();
        if let Some(pattern) = &pattern {
            items_query = items_query.filter(
                users::username
                    .like(pattern.clone())
                    .or(users::email.like(pattern.clone())),
            );
        }
        items_query = items_query.order(users::id.asc());
        if let Some(pagination) = &query.pagination {
            let page = if pagination.page == 0 {
                1
            } else {
                pagination.page
            } as i64;
            let per_page = pagination.per_page as i64;
            items_query = items_query.limit(per_page).offset((page - 1) * per_page);
        }

        let items = items_query
            .load::<DbUser>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect::<Vec<User>>();

        Ok((total as usize, items))
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        use crate::models::user::{NewUser as DbNewUser, User as DbUser};
        use crate::schema::users;

        let mut conn = self.conn()?;
        let insertable: DbNewUser = new_user.into();
        let created = diesel::insert_into(users::table)
            .values(&insertable)
            .get_result::<DbUser>(&mut conn)?;

        Ok(created.into())
    }

    fn update_user(&self, user_id: i32, updates: &UpdateUser) -> RepositoryResult<User> {
        use crate::models::user::{UpdateUser as DbUpdateUser, User as DbUser};
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateUser = updates.into();

        let updated = diesel::update(users::table.find(user_id))
            .set((&db_updates, users::updated_at.eq(diesel::dsl::now)))
            .get_result::<DbUser>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_user(&self, user_id: i32) -> RepositoryResult<()> {
        use crate::schema::settings;
        use crate::schema::users;

        let mut conn = self.conn()?;

        diesel::delete(settings::table.filter(settings::user_id.eq(user_id)))
            .execute(&mut conn)?;
        diesel::delete(users::table.find(user_id)).execute(&mut conn)?;
        Ok(())
    }
}
