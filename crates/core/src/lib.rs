//! Domain rules for the studio content backend.
//!
//! This crate has no I/O. Everything here is shared by the repository
//! layer, the HTTP layer and the tests: ids, roles and the capability
//! policy, supported languages, translation fallback, SEO auto-fill, slug
//! rules, featured-set caps, reorder validation and relation diffs.

pub mod content;
pub mod error;
pub mod featured;
pub mod hashtag;
pub mod locale;
pub mod ordering;
pub mod policy;
pub mod relations;
pub mod roles;
pub mod seo;
pub mod slug;
pub mod translation;
pub mod types;
