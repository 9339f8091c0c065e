//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireEditor`] -- Requires `ADMIN` or `EDITOR`; guards every content write.
//! - [`rbac::RequireAdmin`] -- Requires `ADMIN`.

pub mod auth;
pub mod rbac;
