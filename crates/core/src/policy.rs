//! Capability checks for dashboard operations.
//!
//! Every write path, and every dashboard read, goes through one of these
//! functions exactly once, before any database read or write. The HTTP layer calls them from its RBAC
//! extractors so handlers never repeat the check.

use crate::error::CoreError;
use crate::roles::{CONTENT_EDITOR_ROLES, ROLE_ADMIN};
use crate::types::DbId;

/// The authenticated caller, as reported by the session provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: DbId,
    pub role: String,
}

/// Require a session whose role may create, update, reorder or delete
/// content (`ADMIN` or `EDITOR`).
pub fn require_content_editor(session: Option<&Session>) -> Result<&Session, CoreError> {
    let session = session.ok_or_else(|| CoreError::Unauthorized("No active session".into()))?;
    if !CONTENT_EDITOR_ROLES.contains(&session.role.as_str()) {
        return Err(CoreError::Unauthorized(
            "Admin or Editor role required".into(),
        ));
    }
    Ok(session)
}

/// Require an `ADMIN` session.
pub fn require_admin(session: Option<&Session>) -> Result<&Session, CoreError> {
    let session = session.ok_or_else(|| CoreError::Unauthorized("No active session".into()))?;
    if session.role != ROLE_ADMIN {
        return Err(CoreError::Unauthorized("Admin role required".into()));
    }
    Ok(session)
}
