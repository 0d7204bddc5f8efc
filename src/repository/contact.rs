//! Repository implementation for address-book contacts.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::contact::{Contact, NewContact, UpdateContact, birthday_within_days};
use crate::models::contact::{
    Contact as DbContact, NewContact as DbNewContact, UpdateContact as DbUpdateContact,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ContactListQuery, ContactReader, ContactWriter, DieselRepository};

impl ContactReader for DieselRepository {
    fn get_contact_by_id(
        &self,
        contact_id: i32,
        user_id: i32,
    ) -> RepositoryResult<Option<Contact>> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;
        let contact = contacts::table
            .find(contact_id)
            .filter(contacts::user_id.eq(user_id))
            .first::<DbContact>(&mut conn)
            .optional()?;

        Ok(contact.map(Into::into))
    }

    fn list_contacts(&self, query: ContactListQuery) -> RepositoryResult<(usize, Vec<Contact>)> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;

        let pattern = query.search.as_ref().map(|term| format!("%{term}%"));

        let mut items_query = contacts::table
            .filter(contacts::user_id.eq(query.user_id))
            .order(contacts::id.asc())
            .into_boxed();

        if let Some(pattern) = pattern.as_deref() {
            items_query = items_query.filter(
                contacts::name
                    .like(pattern)
                    .or(contacts::email.like(pattern))
                    .or(contacts::phone.like(pattern)),
            );
        }

        if let Some(pagination) = &query.pagination {
            items_query = items_query
                .limit(pagination.limit)
                .offset(pagination.offset);
        }

        let items = items_query
            .load::<DbContact>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect::<Vec<Contact>>();

        let total: i64 = match pattern.as_deref() {
            Some(pattern) => contacts::table
                .filter(contacts::user_id.eq(query.user_id))
                .filter(
                    contacts::name
                        .like(pattern)
                        .or(contacts::email.like(pattern))
                        .or(contacts::phone.like(pattern)),
                )
                .count()
                .get_result(&mut conn)?,
            None => contacts::table
                .filter(contacts::user_id.eq(query.user_id))
                .count()
                .get_result(&mut conn)?,
        };

        Ok((total as usize, items))
    }

    fn upcoming_birthdays(&self, user_id: i32, within_days: u32) -> RepositoryResult<Vec<Contact>> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;
        let today = Utc::now().date_naive();

        let contacts = contacts::table
            .filter(contacts::user_id.eq(user_id))
            .order(contacts::id.asc())
            .load::<DbContact>(&mut conn)?
            .into_iter()
            .map(Contact::from)
            .filter(|contact| birthday_within_days(contact.birthday, today, within_days))
            .collect();

        Ok(contacts)
    }
}

impl ContactWriter for DieselRepository {
    fn create_contact(&self, new_contact: &NewContact) -> RepositoryResult<Contact> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;
        let db_new_contact: DbNewContact = new_contact.into();

        let created = diesel::insert_into(contacts::table)
            .values(&db_new_contact)
            .get_result::<DbContact>(&mut conn)?;

        Ok(created.into())
    }

    fn update_contact(
        &self,
        contact_id: i32,
        user_id: i32,
        updates: &UpdateContact,
    ) -> RepositoryResult<Contact> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateContact = updates.into();

        let updated = diesel::update(
            contacts::table
                .find(contact_id)
                .filter(contacts::user_id.eq(user_id)),
        )
        .set((&db_updates, contacts::updated_at.eq(Utc::now().naive_utc())))
        .get_result::<DbContact>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_contact(&self, contact_id: i32, user_id: i32) -> RepositoryResult<()> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;
        let affected = diesel::delete(
            contacts::table
                .find(contact_id)
                .filter(contacts::user_id.eq(user_id)),
        )
        .execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
