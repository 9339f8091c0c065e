//! Hashtag dictionary normalization.
//!
//! The dictionary is keyed by exact text; normalization only trims
//! surrounding whitespace and an optional leading `#`, drops blanks, and
//! collapses duplicates while keeping first-seen order.

use std::collections::HashSet;

use crate::error::CoreError;

/// Maximum length of one hashtag.
pub const MAX_HASHTAG_LEN: usize = 100;

/// Normalize the submitted hashtag list for a replace-set `tag` operation.
pub fn normalize_hashtags(texts: &[String]) -> Result<Vec<String>, CoreError> {
    let mut seen = HashSet::new();
    let mut result = Vec::with_capacity(texts.len());
    for raw in texts {
        let text = raw.trim();
        let text = text.strip_prefix('#').unwrap_or(text).trim();
        if text.is_empty() {
            continue;
        }
        if text.chars().count() > MAX_HASHTAG_LEN {
            return Err(CoreError::Validation(format!(
                "Hashtag must be at most {MAX_HASHTAG_LEN} characters"
            )));
        }
        if seen.insert(text.to_string()) {
            result.push(text.to_string());
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn trims_and_strips_hash() {
        let out = normalize_hashtags(&tags(&[" #bts ", "behind"])).unwrap();
        assert_eq!(out, tags(&["bts", "behind"]));
    }

    #[test]
    fn duplicates_collapse_by_text() {
        let out = normalize_hashtags(&tags(&["set", "#set", "Set"])).unwrap();
        assert_eq!(out, tags(&["set", "Set"]));
    }

    #[test]
    fn blanks_dropped() {
        let out = normalize_hashtags(&tags(&["", "  ", "#"])).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn overlong_rejected() {
        assert!(normalize_hashtags(&tags(&[&"x".repeat(101)])).is_err());
    }
}
