//! Address-book operations, always scoped to the owning account.

use crate::domain::contact::{Contact, NewContact, UpdateContact};
use crate::forms::contact::ContactForm;
use crate::repository::{ContactListQuery, ContactReader, ContactWriter};
use crate::services::{ServiceError, ServiceResult};
use validator::Validate;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 500;
pub const BIRTHDAY_WINDOW_DAYS: u32 = 7;

/// Returns a page of the owner's contacts.
pub fn list_contacts<R>(
    repo: &R,
    user_id: i32,
    limit: Option<i64>,
    offset: Option<i64>,
) -> ServiceResult<Vec<Contact>>
where
    R: ContactReader + ?Sized,
{
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = offset.unwrap_or(0).max(0);

    let (_total, contacts) =
        repo.list_contacts(ContactListQuery::new(user_id).paginate(limit, offset))?;
    Ok(contacts)
}

pub fn get_contact<R>(repo: &R, contact_id: i32, user_id: i32) -> ServiceResult<Contact>
where
    R: ContactReader + ?Sized,
{
    repo.get_contact_by_id(contact_id, user_id)?
        .ok_or_else(|| ServiceError::NotFound("Not Found".to_string()))
}

pub fn create_contact<R>(repo: &R, user_id: i32, form: ContactForm) -> ServiceResult<Contact>
where
    R: ContactWriter + ?Sized,
{
    form.validate()?;

    let new_contact = NewContact::new(
        user_id,
        form.name,
        form.email,
        form.phone,
        form.birthday,
        form.notes,
    )?;

    repo.create_contact(&new_contact).map_err(ServiceError::from)
}

pub fn update_contact<R>(
    repo: &R,
    contact_id: i32,
    user_id: i32,
    form: ContactForm,
) -> ServiceResult<Contact>
where
    R: ContactWriter + ?Sized,
{
    form.validate()?;

    let updates = UpdateContact::new(
        form.name,
        form.email,
        form.phone,
        form.birthday,
        form.notes,
    )?;

    repo.update_contact(contact_id, user_id, &updates)
        .map_err(ServiceError::from)
}

pub fn delete_contact<R>(repo: &R, contact_id: i32, user_id: i32) -> ServiceResult<()>
where
    R: ContactWriter + ?Sized,
{
    repo.delete_contact(contact_id, user_id)
        .map_err(ServiceError::from)
}

/// Case-insensitive substring search over name, email and phone.
pub fn search_contacts<R>(repo: &R, user_id: i32, query: &str) -> ServiceResult<Vec<Contact>>
where
    R: ContactReader + ?Sized,
{
    let term = query.trim();
    if term.is_empty() {
        return Err(ServiceError::Validation(
            "Search query cannot be empty".to_string(),
        ));
    }

    let (_total, contacts) = repo.list_contacts(ContactListQuery::new(user_id).search(term))?;

    if contacts.is_empty() {
        return Err(ServiceError::NotFound("No contacts found".to_string()));
    }
    Ok(contacts)
}

/// Contacts with a birthday in the next [`BIRTHDAY_WINDOW_DAYS`] days.
pub fn upcoming_birthdays<R>(repo: &R, user_id: i32) -> ServiceResult<Vec<Contact>>
where
    R: ContactReader + ?Sized,
{
    let contacts = repo.upcoming_birthdays(user_id, BIRTHDAY_WINDOW_DAYS)?;

    if contacts.is_empty() {
        return Err(ServiceError::NotFound(
            "No upcoming birthdays found".to_string(),
        ));
    }
    Ok(contacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use chrono::{NaiveDate, Utc};

    fn sample_contact(id: i32, user_id: i32) -> Contact {
        let now = Utc::now().naive_utc();
        Contact {
            id,
            user_id,
            name: "John".to_string(),
            email: "john@example.com".to_string(),
            phone: "+12025550123".to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 7, 15).unwrap(),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_form() -> ContactForm {
        ContactForm {
            name: "John".to_string(),
            email: "john@example.com".to_string(),
            phone: "+12025550123".to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 7, 15).unwrap(),
            notes: None,
        }
    }

    #[test]
    fn list_clamps_limit() {
        let mut repo = MockRepository::new();
        repo.expect_list_contacts()
            .withf(|query| {
                let pagination = query.pagination.as_ref().unwrap();
                pagination.limit == MAX_PAGE_SIZE && pagination.offset == 0
            })
            .returning(|_| Ok((0, vec![])));

        list_contacts(&repo, 1, Some(9999), None).unwrap();
    }

    #[test]
    fn get_contact_maps_missing_to_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_contact_by_id().returning(|_, _| Ok(None));

        assert!(matches!(
            get_contact(&repo, 1, 1),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn create_contact_rejects_invalid_email() {
        let repo = MockRepository::new();
        let mut form = sample_form();
        form.email = "not-an-email".to_string();

        assert!(matches!(
            create_contact(&repo, 1, form),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn delete_propagates_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_delete_contact()
            .returning(|_, _| Err(RepositoryError::NotFound));

        assert!(matches!(
            delete_contact(&repo, 42, 1),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn empty_search_result_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_list_contacts().returning(|_| Ok((0, vec![])));

        assert!(matches!(
            search_contacts(&repo, 1, "nobody"),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn search_returns_matches() {
        let mut repo = MockRepository::new();
        repo.expect_list_contacts()
            .withf(|query| query.search.as_deref() == Some("john"))
            .returning(|_| Ok((1, vec![sample_contact(1, 1)])));

        let found = search_contacts(&repo, 1, "  john ").unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn no_birthdays_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_upcoming_birthdays().returning(|_, _| Ok(vec![]));

        assert!(matches!(
            upcoming_birthdays(&repo, 1),
            Err(ServiceError::NotFound(_))
        ));
    }
}
