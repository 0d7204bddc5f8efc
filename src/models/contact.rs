//! Diesel models representing address-book contacts.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::contact::{
    Contact as DomainContact, NewContact as DomainNewContact, UpdateContact as DomainUpdateContact,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::contacts)]
/// Diesel model for [`crate::domain::contact::Contact`].
pub struct Contact {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub birthday: NaiveDate,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::contacts)]
/// Insertable form of [`Contact`].
pub struct NewContact<'a> {
    pub user_id: i32,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub birthday: NaiveDate,
    pub notes: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::contacts)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`Contact`] record.
pub struct UpdateContact<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub birthday: NaiveDate,
    pub notes: Option<&'a str>,
}

impl From<Contact> for DomainContact {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            user_id: contact.user_id,
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

impl<'a> From<&'a DomainNewContact> for NewContact<'a> {
    fn from(contact: &'a DomainNewContact) -> Self {
        Self {
            user_id: contact.user_id,
            name: &contact.name,
            email: &contact.email,
            phone: &contact.phone,
            birthday: contact.birthday,
            notes: contact.notes.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateContact> for UpdateContact<'a> {
    fn from(contact: &'a DomainUpdateContact) -> Self {
        Self {
            name: &contact.name,
            email: &contact.email,
            phone: &contact.phone,
            birthday: contact.birthday,
            notes: contact.notes.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_domain_new() -> DomainNewContact {
        DomainNewContact::new(
            1,
            "John",
            "john@example.com",
            "+12025550123",
            NaiveDate::from_ymd_opt(1990, 7, 15).unwrap(),
            Some("college friend".to_string()),
        )
        .unwrap()
    }

    #[test]
    fn from_domain_new_creates_newcontact() {
        let domain = sample_domain_new();
        let new: NewContact = (&domain).into();
        assert_eq!(new.user_id, domain.user_id);
        assert_eq!(new.name, domain.name);
        assert_eq!(new.email, domain.email);
        assert_eq!(new.phone, domain.phone);
        assert_eq!(new.notes, domain.notes.as_deref());
    }

    #[test]
    fn contact_into_domain() {
        let now: NaiveDateTime = Utc::now().naive_utc();
        let db_contact = Contact {
            id: 7,
            user_id: 1,
            name: "John".to_string(),
            email: "john@example.com".to_string(),
            phone: "+12025550123".to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 7, 15).unwrap(),
            notes: None,
            created_at: now,
            updated_at: now,
        };
        let domain: DomainContact = db_contact.into();
        assert_eq!(domain.id, 7);
        assert_eq!(domain.user_id, 1);
        assert_eq!(domain.phone, "+12025550123");
        assert_eq!(domain.notes, None);
    }
}
