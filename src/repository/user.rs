//! Repository implementation for user accounts.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::user::{NewUser, User};
use crate::models::user::{NewUser as DbNewUser, User as DbUser};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, UserReader, UserWriter};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table.find(id).first::<DbUser>(&mut conn).optional()?;

        user.map(User::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::email.eq(email))
            .first::<DbUser>(&mut conn)
            .optional()?;

        user.map(User::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_new_user: DbNewUser = new_user.into();

        let created = diesel::insert_into(users::table)
            .values(&db_new_user)
            .get_result::<DbUser>(&mut conn)?;

        User::try_from(created).map_err(RepositoryError::from)
    }

    fn set_refresh_token(&self, email: &str, token: Option<&str>) -> RepositoryResult<()> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let affected = diesel::update(users::table.filter(users::email.eq(email)))
            .set((
                users::refresh_token.eq(token),
                users::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn confirm_user_email(&self, email: &str) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let updated = diesel::update(users::table.filter(users::email.eq(email)))
            .set((
                users::confirmed.eq(true),
                users::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbUser>(&mut conn)?;

        User::try_from(updated).map_err(RepositoryError::from)
    }

    fn update_avatar(&self, email: &str, avatar_url: &str) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let updated = diesel::update(users::table.filter(users::email.eq(email)))
            .set((
                users::avatar.eq(avatar_url),
                users::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbUser>(&mut conn)?;

        User::try_from(updated).map_err(RepositoryError::from)
    }

    fn update_password(&self, email: &str, password_hash: &str) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let updated = diesel::update(users::table.filter(users::email.eq(email)))
            .set((
                users::password_hash.eq(password_hash),
                users::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbUser>(&mut conn)?;

        User::try_from(updated).map_err(RepositoryError::from)
    }
}
