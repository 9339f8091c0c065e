//! Content kinds, their enumerated attributes, and the public routes each
//! kind can appear on.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// ContentKind
// ---------------------------------------------------------------------------

/// Every kind of record the admin dashboard can mutate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Film,
    PressItem,
    MissionStatement,
    HomePage,
    SiteSettings,
    MediaAsset,
}

impl ContentKind {
    /// Return the wire-format string for this variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Film => "film",
            Self::PressItem => "press_item",
            Self::MissionStatement => "mission_statement",
            Self::HomePage => "home_page",
            Self::SiteSettings => "site_settings",
            Self::MediaAsset => "media_asset",
        }
    }

    /// Entity name used in `NotFound` errors.
    pub fn entity_name(&self) -> &'static str {
        match self {
            Self::Film => "Film",
            Self::PressItem => "PressItem",
            Self::MissionStatement => "MissionStatement",
            Self::HomePage => "HomePage",
            Self::SiteSettings => "SiteSettings",
            Self::MediaAsset => "MediaAsset",
        }
    }

    /// Route patterns that must be marked stale after a successful write to
    /// this kind: every public page that renders it, plus its admin listing.
    pub fn invalidation_routes(&self) -> &'static [&'static str] {
        match self {
            Self::Film => &["/", "/films", "/films/[slug]", "/admin/films"],
            Self::PressItem => &["/", "/press", "/films/[slug]", "/admin/press"],
            Self::MissionStatement => &["/", "/admin/missions"],
            Self::HomePage => &["/", "/admin/home"],
            Self::SiteSettings => &["/"],
            Self::MediaAsset => &["/admin", "/admin/films", "/admin/press"],
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// OrderableKind
// ---------------------------------------------------------------------------

/// Listable entities that carry a `published` flag and a `sort_order` rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderableKind {
    Film,
    PressItem,
    MissionStatement,
}

impl OrderableKind {
    /// Backing table. Only ever one of these three literals, so it is safe
    /// to interpolate into SQL.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Film => "films",
            Self::PressItem => "press_items",
            Self::MissionStatement => "mission_statements",
        }
    }

    /// Translation table and its parent foreign-key column.
    pub fn translation_table(&self) -> (&'static str, &'static str) {
        match self {
            Self::Film => ("film_translations", "film_id"),
            Self::PressItem => ("press_item_translations", "press_item_id"),
            Self::MissionStatement => ("mission_statement_translations", "mission_statement_id"),
        }
    }

    pub fn content_kind(&self) -> ContentKind {
        match self {
            Self::Film => ContentKind::Film,
            Self::PressItem => ContentKind::PressItem,
            Self::MissionStatement => ContentKind::MissionStatement,
        }
    }
}

// ---------------------------------------------------------------------------
// PressKind
// ---------------------------------------------------------------------------

/// What kind of coverage a press item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PressKind {
    Publication,
    Review,
    Interview,
    News,
}

impl PressKind {
    /// Return the wire-format string for this variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Publication => "PUBLICATION",
            Self::Review => "REVIEW",
            Self::Interview => "INTERVIEW",
            Self::News => "NEWS",
        }
    }

    /// Parse from a wire-format string.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "PUBLICATION" => Ok(Self::Publication),
            "REVIEW" => Ok(Self::Review),
            "INTERVIEW" => Ok(Self::Interview),
            "NEWS" => Ok(Self::News),
            _ => Err(CoreError::Validation(format!(
                "Invalid press kind: '{s}'. Must be one of: PUBLICATION, REVIEW, INTERVIEW, NEWS"
            ))),
        }
    }
}

impl std::fmt::Display for PressKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MediaKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Return the wire-format string for this variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "IMAGE",
            Self::Video => "VIDEO",
        }
    }

    /// Lenient parse used by the upload form: anything but `VIDEO` is an
    /// image.
    pub fn from_form_value(s: Option<&str>) -> Self {
        match s {
            Some("VIDEO") => Self::Video,
            _ => Self::Image,
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
