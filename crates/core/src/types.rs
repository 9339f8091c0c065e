/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates without a time component (release dates, publish dates).
pub type Date = chrono::NaiveDate;

/// Fixed primary key of the singleton configuration rows
/// (`home_pages`, `site_settings`).
pub const SINGLETON_ID: &str = "singleton";

/// Id sentinel the admin UI sends for "create a new record".
pub const NEW_ID_SENTINEL: &str = "new";

/// The `id` field of an upsert payload: either an existing record's id or
/// the create sentinel. Numeric strings are accepted as ids.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum PayloadId {
    Id(DbId),
    Text(String),
}

impl PayloadId {
    /// `None` means "create". Any other non-numeric text is rejected.
    pub fn existing(&self) -> Result<Option<DbId>, crate::error::CoreError> {
        match self {
            Self::Id(id) => Ok(Some(*id)),
            Self::Text(s) if s == NEW_ID_SENTINEL || s.is_empty() => Ok(None),
            Self::Text(s) => s.parse::<DbId>().map(Some).map_err(|_| {
                crate::error::CoreError::Validation(format!("Invalid id '{s}'"))
            }),
        }
    }
}

/// Resolve an optional payload id; absent means "create".
pub fn existing_id(id: Option<&PayloadId>) -> Result<Option<DbId>, crate::error::CoreError> {
    match id {
        Some(id) => id.existing(),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sentinel_means_create() {
        let id: PayloadId = serde_json::from_str("\"new\"").unwrap();
        assert_eq!(id.existing().unwrap(), None);
        assert_eq!(existing_id(None).unwrap(), None);
    }

    #[test]
    fn numeric_and_string_ids_accepted() {
        let id: PayloadId = serde_json::from_str("42").unwrap();
        assert_eq!(id.existing().unwrap(), Some(42));
        let id: PayloadId = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(id.existing().unwrap(), Some(7));
    }

    #[test]
    fn garbage_id_rejected() {
        let id = PayloadId::Text("abc".into());
        assert!(id.existing().is_err());
    }
}
