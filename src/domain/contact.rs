use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ContactName, ContactNotes, EmailAddress, PhoneNumber, TypeConstraintError,
};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
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

#[derive(Clone, Debug)]
pub struct NewContact {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub birthday: NaiveDate,
    pub notes: Option<String>,
}

impl NewContact {
    /// Normalizes and validates raw contact data for the given owner.
    pub fn new(
        user_id: i32,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        birthday: NaiveDate,
        notes: Option<String>,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            user_id,
            name: ContactName::new(name)?.into_inner(),
            email: EmailAddress::new(email)?.into_inner(),
            phone: PhoneNumber::new(phone)?.into_inner(),
            birthday,
            notes: normalize_notes(notes)?,
        })
    }
}

#[derive(Clone, Debug)]
pub struct UpdateContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub birthday: NaiveDate,
    pub notes: Option<String>,
}

impl UpdateContact {
    /// Normalizes and validates replacement values for an existing contact.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        birthday: NaiveDate,
        notes: Option<String>,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            name: ContactName::new(name)?.into_inner(),
            email: EmailAddress::new(email)?.into_inner(),
            phone: PhoneNumber::new(phone)?.into_inner(),
            birthday,
            notes: normalize_notes(notes)?,
        })
    }
}

fn normalize_notes(notes: Option<String>) -> Result<Option<String>, TypeConstraintError> {
    match notes {
        Some(text) if !text.trim().is_empty() => {
            Ok(Some(ContactNotes::new(text)?.into_inner()))
        }
        _ => Ok(None),
    }
}

/// Returns true when the birthday's month/day falls within `days` days of
/// `today`, handling the wrap across a year boundary.
pub fn birthday_within_days(birthday: NaiveDate, today: NaiveDate, days: u32) -> bool {
    (0..=days).any(|offset| {
        let day = today + chrono::Duration::days(i64::from(offset));
        // Feb 29 birthdays are celebrated on Feb 28 in non-leap years.
        let (month, dom) = match (birthday.month(), birthday.day()) {
            (2, 29) if !is_leap_year(day.year()) => (2, 28),
            other => other,
        };
        day.month() == month && day.day() == dom
    })
}

fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}
