//! Account profile operations.

use crate::domain::user::{Role, User};
use crate::repository::{UserReader, UserWriter};
use crate::services::cache::UserCache;
use crate::services::{ServiceError, ServiceResult};

pub fn get_user_by_email<R>(repo: &R, email: &str) -> ServiceResult<Option<User>>
where
    R: UserReader + ?Sized,
{
    repo.get_user_by_email(email).map_err(ServiceError::from)
}

/// Replaces the caller's avatar URL. Restricted to admin accounts.
pub fn update_avatar<R>(
    repo: &R,
    cache: &UserCache,
    user: &User,
    avatar_url: &str,
) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    if user.role != Role::Admin {
        return Err(ServiceError::Forbidden);
    }

    let updated = repo.update_avatar(&user.email, avatar_url)?;
    cache.invalidate(&user.email);
    Ok(updated)
}
