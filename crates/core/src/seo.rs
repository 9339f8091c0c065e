//! SEO field auto-fill.
//!
//! A field is filled only when it is blank (empty after trimming). Lengths
//! are counted in characters, not bytes, so Greek text is never split inside
//! a code point.

/// Maximum length of a generated `meta_title`.
pub const META_TITLE_MAX_CHARS: usize = 60;

/// Maximum length of a generated `meta_description`.
pub const META_DESCRIPTION_MAX_CHARS: usize = 160;

/// Separator used when synthesizing `keywords`.
pub const KEYWORD_SEPARATOR: &str = ", ";

/// Whether a text field counts as "never set".
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Truncate to at most `max` characters.
pub fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// Set `meta_title` from `title` when `meta_title` is blank and `title` is not.
pub fn fill_meta_title(meta_title: &mut String, title: &str) {
    if is_blank(meta_title) && !is_blank(title) {
        *meta_title = truncate_chars(title, META_TITLE_MAX_CHARS);
    }
}

/// Set `meta_description` from the first non-blank candidate.
pub fn fill_meta_description(meta_description: &mut String, candidates: &[&str]) {
    if !is_blank(meta_description) {
        return;
    }
    if let Some(source) = candidates.iter().find(|c| !is_blank(c)) {
        *meta_description = truncate_chars(source, META_DESCRIPTION_MAX_CHARS);
    }
}

/// Set `keywords` by joining the non-blank `parts`. Leaves the field alone
/// when there is nothing to join.
pub fn fill_keywords<S: AsRef<str>>(keywords: &mut String, parts: &[S]) {
    if !is_blank(keywords) {
        return;
    }
    let joined = parts
        .iter()
        .map(|p| p.as_ref().trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(KEYWORD_SEPARATOR);
    if !joined.is_empty() {
        *keywords = joined;
    }
}

/// The three SEO columns every translation table carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeoFields {
    pub meta_title: String,
    pub meta_description: String,
    pub keywords: String,
}

/// Source material used to derive blank SEO fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeoSource<'a> {
    pub title: &'a str,
    /// Ordered candidates for the description (logline, synopsis, ...).
    pub descriptions: &'a [&'a str],
    /// Parts joined into keywords (tags, or outlet + kind).
    pub keyword_parts: &'a [&'a str],
}

impl SeoFields {
    /// Fill every blank field from `source`.
    pub fn auto_fill(&mut self, source: &SeoSource<'_>) {
        fill_meta_title(&mut self.meta_title, source.title);
        fill_meta_description(&mut self.meta_description, source.descriptions);
        fill_keywords(&mut self.keywords, source.keyword_parts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_title_from_title_truncated() {
        let mut meta = String::new();
        let title = "a".repeat(80);
        fill_meta_title(&mut meta, &title);
        assert_eq!(meta.chars().count(), META_TITLE_MAX_CHARS);
    }

    #[test]
    fn meta_title_counts_greek_characters() {
        let mut meta = String::new();
        let title = "Ω".repeat(70);
        fill_meta_title(&mut meta, &title);
        assert_eq!(meta, "Ω".repeat(60));
    }

    #[test]
    fn explicit_meta_title_not_clobbered() {
        let mut meta = "Custom".to_string();
        fill_meta_title(&mut meta, "Derived title");
        assert_eq!(meta, "Custom");
    }

    #[test]
    fn whitespace_meta_title_counts_as_blank() {
        let mut meta = "   ".to_string();
        fill_meta_title(&mut meta, "Title");
        assert_eq!(meta, "Title");
    }

    #[test]
    fn blank_title_leaves_meta_title_empty() {
        let mut meta = String::new();
        fill_meta_title(&mut meta, "  ");
        assert_eq!(meta, "");
    }

    #[test]
    fn meta_description_uses_first_non_blank_candidate() {
        let mut meta = String::new();
        fill_meta_description(&mut meta, &["", "  ", "Synopsis text", "Other"]);
        assert_eq!(meta, "Synopsis text");
    }

    #[test]
    fn meta_description_truncated_to_160() {
        let mut meta = String::new();
        let long = "x".repeat(300);
        fill_meta_description(&mut meta, &[long.as_str()]);
        assert_eq!(meta.len(), META_DESCRIPTION_MAX_CHARS);
    }

    #[test]
    fn keywords_join_non_blank_parts() {
        let mut kw = String::new();
        fill_keywords(&mut kw, &["Athens Voice", "", "NEWS"]);
        assert_eq!(kw, "Athens Voice, NEWS");
    }

    #[test]
    fn keywords_untouched_without_parts() {
        let mut kw = String::new();
        let parts: [&str; 0] = [];
        fill_keywords(&mut kw, &parts);
        assert_eq!(kw, "");
    }

    #[test]
    fn auto_fill_is_idempotent() {
        let source = SeoSource {
            title: "Δύο Ζωές",
            descriptions: &["Ένα έργο για τη δύναμη"],
            keyword_parts: &["health", "hope"],
        };
        let mut first = SeoFields::default();
        first.auto_fill(&source);
        let mut second = first.clone();
        second.auto_fill(&source);
        assert_eq!(first, second);
        assert_eq!(first.meta_title, "Δύο Ζωές");
        assert_eq!(first.keywords, "health, hope");
    }
}
