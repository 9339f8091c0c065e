//! Dashboard accounts.

use serde::Serialize;
use sqlx::FromRow;
use studio_core::types::{DbId, Timestamp};

/// A `users` row. Not `Serialize`: it carries the password hash.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for [`UserRepo::create`](crate::repositories::UserRepo::create).
#[derive(Debug, Clone, Copy)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub name: Option<&'a str>,
    pub role: &'a str,
}

/// The account as the dashboard sees it after login.
#[derive(Debug, Clone, Serialize)]
pub struct SessionUser {
    pub id: DbId,
    pub email: String,
    pub name: Option<String>,
    pub role: String,
}

impl From<User> for SessionUser {
    fn from(user: User) -> Self {
        let User {
            id,
            email,
            name,
            role,
            ..
        } = user;
        Self {
            id,
            email,
            name,
            role,
        }
    }
}
