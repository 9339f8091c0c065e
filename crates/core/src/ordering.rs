//! Validation for bulk re-rank requests.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::relations::validate_unique_ids;
use crate::types::DbId;

/// Check that `ordered` is a complete permutation of `existing`.
///
/// Partial lists are rejected: ranks of omitted rows would silently go
/// stale otherwise.
pub fn validate_full_permutation(existing: &[DbId], ordered: &[DbId]) -> Result<(), CoreError> {
    validate_unique_ids("reorder list", ordered)?;

    let existing_set: HashSet<DbId> = existing.iter().copied().collect();
    if let Some(unknown) = ordered.iter().find(|id| !existing_set.contains(id)) {
        return Err(CoreError::Validation(format!(
            "Reorder list contains unknown id {unknown}"
        )));
    }
    if ordered.len() != existing_set.len() {
        return Err(CoreError::Validation(format!(
            "Reorder list must contain all {} items, got {}",
            existing_set.len(),
            ordered.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_permutation_accepted() {
        assert!(validate_full_permutation(&[1, 2, 3], &[3, 1, 2]).is_ok());
    }

    #[test]
    fn empty_collection_accepts_empty_list() {
        assert!(validate_full_permutation(&[], &[]).is_ok());
    }

    #[test]
    fn partial_list_rejected() {
        assert!(validate_full_permutation(&[1, 2, 3], &[3, 1]).is_err());
    }

    #[test]
    fn unknown_id_rejected() {
        assert!(validate_full_permutation(&[1, 2], &[1, 2, 99]).is_err());
    }

    #[test]
    fn duplicate_id_rejected() {
        assert!(validate_full_permutation(&[1, 2], &[1, 1]).is_err());
    }
}
