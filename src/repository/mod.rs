use diesel::prelude::*;

use crate::db::{DbConnection, DbPool};
use crate::domain::contact::{Contact, NewContact, UpdateContact};
use crate::domain::user::{NewUser, User};
use crate::repository::errors::RepositoryResult;

pub mod contact;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod user;

/// Shared Diesel-backed repository handed to every handler.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }

    /// Executes a trivial query, proving the database is reachable.
    pub fn ping(&self) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        diesel::sql_query("SELECT 1").execute(&mut conn)?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Clone)]
pub struct ContactListQuery {
    pub user_id: i32,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl ContactListQuery {
    pub fn new(user_id: i32) -> Self {
        Self {
            user_id,
            search: None,
            pagination: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn paginate(mut self, limit: i64, offset: i64) -> Self {
        self.pagination = Some(Pagination { limit, offset });
        self
    }
}

pub trait UserReader {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
}

pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    fn set_refresh_token(&self, email: &str, token: Option<&str>) -> RepositoryResult<()>;
    fn confirm_user_email(&self, email: &str) -> RepositoryResult<User>;
    fn update_avatar(&self, email: &str, avatar_url: &str) -> RepositoryResult<User>;
    fn update_password(&self, email: &str, password_hash: &str) -> RepositoryResult<User>;
}

pub trait ContactReader {
    fn get_contact_by_id(&self, contact_id: i32, user_id: i32)
    -> RepositoryResult<Option<Contact>>;
    fn list_contacts(&self, query: ContactListQuery) -> RepositoryResult<(usize, Vec<Contact>)>;
    fn upcoming_birthdays(&self, user_id: i32, within_days: u32) -> RepositoryResult<Vec<Contact>>;
}

pub trait ContactWriter {
    fn create_contact(&self, new_contact: &NewContact) -> RepositoryResult<Contact>;
    fn update_contact(
        &self,
        contact_id: i32,
        user_id: i32,
        updates: &UpdateContact,
    ) -> RepositoryResult<Contact>;
    fn delete_contact(&self, contact_id: i32, user_id: i32) -> RepositoryResult<()>;
}
