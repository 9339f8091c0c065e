//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - `FromRow` + `Serialize` structs matching database rows
//! - `Deserialize` payload DTOs accepted by the write engine
//! - Composite read models assembled by the repositories

pub mod film;
pub mod home;
pub mod media;
pub mod mission;
pub mod press;
pub mod settings;
pub mod user;

use std::collections::{BTreeMap, HashMap};

use studio_core::types::DbId;

/// Group translation (or edge) rows by their parent id, preserving row order.
pub(crate) fn group_by_parent<T>(
    rows: Vec<T>,
    parent_of: impl Fn(&T) -> DbId,
) -> HashMap<DbId, Vec<T>> {
    let mut grouped: HashMap<DbId, Vec<T>> = HashMap::new();
    for row in rows {
        grouped.entry(parent_of(&row)).or_default().push(row);
    }
    grouped
}

/// Translation payloads keyed by language code.
pub type TranslationMap<T> = BTreeMap<String, T>;
