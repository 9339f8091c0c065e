//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint on `users.role` in
//! `20260101000001_create_users.sql`.

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_EDITOR: &str = "EDITOR";
pub const ROLE_VIEWER: &str = "VIEWER";

/// Roles allowed to mutate content.
pub const CONTENT_EDITOR_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_EDITOR];

/// All roles a user row may carry.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_EDITOR, ROLE_VIEWER];
