//! Diesel models representing user accounts.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::TypeConstraintError;
use crate::domain::user::{NewUser as DomainNewUser, Role, User as DomainUser};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::users)]
/// Diesel model for [`crate::domain::user::User`].
pub struct User {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub avatar: Option<String>,
    pub refresh_token: Option<String>,
    pub confirmed: bool,
    pub role: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
/// Insertable form of [`User`].
pub struct NewUser<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub full_name: &'a str,
    pub role: &'a str,
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        let role = Role::try_from(user.role.as_str())?;
        Ok(Self {
            id: user.id,
            email: user.email,
            password_hash: user.password_hash,
            full_name: user.full_name,
            avatar: user.avatar,
            refresh_token: user.refresh_token,
            confirmed: user.confirmed,
            role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewUser> for NewUser<'a> {
    fn from(user: &'a DomainNewUser) -> Self {
        Self {
            email: &user.email,
            password_hash: &user.password_hash,
            full_name: &user.full_name,
            role: user.role.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_db_user(role: &str) -> User {
        let now = Utc::now().naive_utc();
        User {
            id: 1,
            email: "jane@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            full_name: "Jane Doe".to_string(),
            avatar: None,
            refresh_token: None,
            confirmed: true,
            role: role.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn user_converts_into_domain() {
        let domain = DomainUser::try_from(sample_db_user("admin")).unwrap();
        assert_eq!(domain.role, Role::Admin);
        assert_eq!(domain.email, "jane@example.com");
        assert!(domain.confirmed);
    }

    #[test]
    fn unknown_role_fails_conversion() {
        assert!(DomainUser::try_from(sample_db_user("superuser")).is_err());
    }

    #[test]
    fn from_domain_new_creates_newuser() {
        let domain =
            DomainNewUser::new("jane@example.com", "hash", "Jane Doe", Role::User).unwrap();
        let new: NewUser = (&domain).into();
        assert_eq!(new.email, "jane@example.com");
        assert_eq!(new.role, "user");
    }
}
