//! Supported site languages.

use crate::error::CoreError;

pub const LANG_EL: &str = "el";
pub const LANG_EN: &str = "en";

/// The site's default language, used as the first fallback when a
/// requested translation is missing.
pub const DEFAULT_LANGUAGE: &str = LANG_EL;

/// Every language that must have exactly one translation row per entity.
pub const SUPPORTED_LANGUAGES: &[&str] = &[LANG_EL, LANG_EN];

/// Whether `lang` is one of [`SUPPORTED_LANGUAGES`].
pub fn is_supported(lang: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&lang)
}

/// Reject translation payload keys outside the supported set.
pub fn validate_language_keys<'a>(
    keys: impl IntoIterator<Item = &'a String>,
) -> Result<(), CoreError> {
    for key in keys {
        if !is_supported(key) {
            return Err(CoreError::Validation(format!(
                "Unsupported language '{key}'. Supported: {}",
                SUPPORTED_LANGUAGES.join(", ")
            )));
        }
    }
    Ok(())
}
