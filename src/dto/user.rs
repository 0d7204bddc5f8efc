use serde::Serialize;

use crate::domain::user::{Role, User};

/// Publicly exposable subset of an account row.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub full_name: String,
    pub avatar: Option<String>,
    pub role: Role,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            avatar: user.avatar,
            role: user.role,
        }
    }
}
