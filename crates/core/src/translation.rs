//! Translation resolution for public reads.
//!
//! Lookup order: the requested language, then [`DEFAULT_LANGUAGE`], then the
//! first stored row. Only an entity with zero translation rows resolves to
//! `None`; asking for an unsupported language never fails.

use crate::error::CoreError;
use crate::locale::DEFAULT_LANGUAGE;

/// A translation row keyed by language code.
pub trait Localized {
    fn lang(&self) -> &str;
}

/// Pick the translation to display for `requested`.
pub fn resolve<'a, T: Localized>(rows: &'a [T], requested: &str) -> Option<&'a T> {
    rows.iter()
        .find(|row| row.lang() == requested)
        .or_else(|| rows.iter().find(|row| row.lang() == DEFAULT_LANGUAGE))
        .or_else(|| rows.first())
}

/// Like [`resolve`], but yields `T::default()` for an entity with no rows so
/// display code always has string fields to work with.
pub fn resolve_or_default<T: Localized + Clone + Default>(rows: &[T], requested: &str) -> T {
    resolve(rows, requested).cloned().unwrap_or_default()
}

/// Films, press items and missions must carry a non-blank title in the
/// default language. `title` is the submitted default-language title, if
/// the payload had that language at all.
pub fn require_default_title(title: Option<&str>) -> Result<(), CoreError> {
    match title {
        Some(t) if !t.trim().is_empty() => Ok(()),
        _ => Err(CoreError::Validation(format!(
            "A title in the default language ({DEFAULT_LANGUAGE}) is required"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Row {
        lang: String,
        title: String,
    }

    impl Localized for Row {
        fn lang(&self) -> &str {
            &self.lang
        }
    }

    fn row(lang: &str, title: &str) -> Row {
        Row {
            lang: lang.into(),
            title: title.into(),
        }
    }

    #[test]
    fn exact_language_wins() {
        let rows = vec![row("el", "Τίτλος"), row("en", "Title")];
        assert_eq!(resolve(&rows, "en").unwrap().title, "Title");
        assert_eq!(resolve(&rows, "el").unwrap().title, "Τίτλος");
    }

    #[test]
    fn unsupported_language_falls_back_to_greek() {
        let rows = vec![row("en", "Title"), row("el", "Τίτλος")];
        assert_eq!(resolve(&rows, "fr").unwrap().title, "Τίτλος");
    }

    #[test]
    fn falls_back_to_first_row_without_greek() {
        let rows = vec![row("en", "Title")];
        assert_eq!(resolve(&rows, "el").unwrap().title, "Title");
        assert_eq!(resolve(&rows, "de").unwrap().title, "Title");
    }

    #[test]
    fn empty_entity_resolves_to_none() {
        let rows: Vec<Row> = Vec::new();
        assert!(resolve(&rows, "el").is_none());
        assert_eq!(resolve_or_default(&rows, "el"), Row::default());
    }

    #[test]
    fn non_empty_entity_always_resolves() {
        let rows = vec![row("en", "Title")];
        for lang in ["el", "en", "fr", ""] {
            assert!(resolve(&rows, lang).is_some(), "lang {lang:?} should resolve");
        }
    }

    #[test]
    fn default_title_required() {
        assert!(require_default_title(Some("Ταινία")).is_ok());
        assert!(require_default_title(Some("   ")).is_err());
        assert!(require_default_title(None).is_err());
    }
}
