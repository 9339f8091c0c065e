//! Replace-set reconciliation for many-to-many edges.
//!
//! The submitted id list is the complete desired membership. Applying it is
//! expressed as a diff against the stored membership so the repository can
//! delete only removed edges, insert only added ones, and rewrite positions
//! of the rest.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::DbId;

/// Outcome of comparing stored membership with the desired list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetDiff {
    /// Ids present in the desired list but not stored, in desired order.
    pub added: Vec<DbId>,
    /// Ids stored but absent from the desired list, in stored order.
    pub removed: Vec<DbId>,
    /// Ids in both, in desired order.
    pub kept: Vec<DbId>,
}

impl SetDiff {
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Diff `current` membership against `desired`.
pub fn diff_ids(current: &[DbId], desired: &[DbId]) -> SetDiff {
    let current_set: HashSet<DbId> = current.iter().copied().collect();
    let desired_set: HashSet<DbId> = desired.iter().copied().collect();

    let mut diff = SetDiff::default();
    for &id in desired {
        if current_set.contains(&id) {
            diff.kept.push(id);
        } else {
            diff.added.push(id);
        }
    }
    diff.removed = current
        .iter()
        .copied()
        .filter(|id| !desired_set.contains(id))
        .collect();
    diff
}

/// Position of every desired id, i.e. its index in the submitted list.
pub fn positions(desired: &[DbId]) -> impl Iterator<Item = (DbId, i32)> + '_ {
    desired.iter().enumerate().map(|(i, &id)| (id, i as i32))
}

/// Reject lists that name the same id twice.
pub fn validate_unique_ids(label: &str, ids: &[DbId]) -> Result<(), CoreError> {
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(*id) {
            return Err(CoreError::Validation(format!(
                "Duplicate id {id} in {label}"
            )));
        }
    }
    Ok(())
}
