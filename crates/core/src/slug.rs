//! Slug generation and validation.

use crate::error::CoreError;

/// Maximum slug length.
pub const MAX_SLUG_LEN: usize = 200;

/// Generate a URL-safe slug from free text.
///
/// Converts to lowercase, replaces anything that is not ASCII alphanumeric
/// with hyphens, collapses consecutive hyphens, and trims leading/trailing
/// hyphens. Non-Latin text (e.g. Greek) produces an empty slug.
pub fn generate_slug(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_hyphen = true;
    for c in text.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen {
            result.push('-');
            prev_hyphen = true;
        }
    }
    result.trim_matches('-').to_string()
}

/// Validate a slug (non-empty, only lowercase alphanumeric + hyphens).
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".into()));
    }
    if slug.len() > MAX_SLUG_LEN {
        return Err(CoreError::Validation(format!(
            "Slug must be at most {MAX_SLUG_LEN} characters"
        )));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CoreError::Validation(
            "Slug must contain only lowercase alphanumeric characters and hyphens".into(),
        ));
    }
    Ok(())
}

/// Use `explicit` when given, otherwise derive a slug from the first
/// candidate that produces a non-empty one.
pub fn slug_or_generate(explicit: Option<&str>, candidates: &[&str]) -> Result<String, CoreError> {
    if let Some(slug) = explicit.map(str::trim).filter(|s| !s.is_empty()) {
        validate_slug(slug)?;
        return Ok(slug.to_string());
    }
    candidates
        .iter()
        .map(|c| generate_slug(c))
        .find(|s| !s.is_empty())
        .ok_or_else(|| {
            CoreError::Validation("Slug is required and could not be derived".into())
        })
}

/// `base` when no row uses it, otherwise the first of `base-2`, `base-3`,
/// ... missing from `taken`. The base is shortened so the suffixed slug
/// stays within [`MAX_SLUG_LEN`].
pub fn first_free_slug<S: AsRef<str>>(base: &str, taken: &[S]) -> String {
    let is_taken = |candidate: &str| taken.iter().any(|t| t.as_ref() == candidate);
    let with_suffix = |suffix: &str| {
        let head: String = base.chars().take(MAX_SLUG_LEN - suffix.len()).collect();
        format!("{}{suffix}", head.trim_end_matches('-'))
    };

    let plain = with_suffix("");
    if !is_taken(&plain) {
        return plain;
    }
    let mut n = 2u32;
    loop {
        let candidate = with_suffix(&format!("-{n}"));
        if !is_taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
