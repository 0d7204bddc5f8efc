use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::contact::Contact;

/// Contact representation returned by every contacts endpoint.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub birthday: NaiveDate,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            birthday: contact.birthday,
            notes: contact.notes,
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        }
    }
}

/// Maps a list of domain contacts into response payloads.
pub fn contact_list(contacts: Vec<Contact>) -> Vec<ContactResponse> {
    contacts.into_iter().map(Into::into).collect()
}
