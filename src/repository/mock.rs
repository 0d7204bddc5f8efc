//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::contact::{Contact, NewContact, UpdateContact};
use crate::domain::user::{NewUser, User};
use crate::repository::errors::RepositoryResult;
use crate::repository::{ContactListQuery, ContactReader, ContactWriter, UserReader, UserWriter};

mock! {
    pub Repository {}

    impl UserReader for Repository {
        fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
        fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    }

    impl UserWriter for Repository {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn set_refresh_token<'a>(&self, email: &str, token: Option<&'a str>) -> RepositoryResult<()>;
        fn confirm_user_email(&self, email: &str) -> RepositoryResult<User>;
        fn update_avatar(&self, email: &str, avatar_url: &str) -> RepositoryResult<User>;
        fn update_password(&self, email: &str, password_hash: &str) -> RepositoryResult<User>;
    }

    impl ContactReader for Repository {
        fn get_contact_by_id(
            &self,
            contact_id: i32,
            user_id: i32,
        ) -> RepositoryResult<Option<Contact>>;
        fn list_contacts(&self, query: ContactListQuery) -> RepositoryResult<(usize, Vec<Contact>)>;
        fn upcoming_birthdays(
            &self,
            user_id: i32,
            within_days: u32,
        ) -> RepositoryResult<Vec<Contact>>;
    }

    impl ContactWriter for Repository {
        fn create_contact(&self, new_contact: &NewContact) -> RepositoryResult<Contact>;
        fn update_contact(
            &self,
            contact_id: i32,
            user_id: i32,
            updates: &UpdateContact,
        ) -> RepositoryResult<Contact>;
        fn delete_contact(&self, contact_id: i32, user_id: i32) -> RepositoryResult<()>;
    }
}
