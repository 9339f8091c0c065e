//! Media asset and hashtag models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studio_core::types::{DbId, Timestamp};

/// A row from the `media_assets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MediaAsset {
    pub id: DbId,
    /// `IMAGE` or `VIDEO`.
    pub kind: String,
    pub url: String,
    pub alt: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `hashtags` dictionary.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Hashtag {
    pub id: DbId,
    pub text: String,
}

/// A media asset together with its hashtags, for the media library.
#[derive(Debug, Clone, Serialize)]
pub struct MediaAssetWithHashtags {
    #[serde(flatten)]
    pub asset: MediaAsset,
    pub hashtags: Vec<String>,
}

/// DTO for editing an asset's description. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMediaDetails {
    pub alt: Option<String>,
    /// Replace-set: the full desired list of hashtag texts.
    pub hashtags: Option<Vec<String>>,
}

/// A gallery-bearing parent an asset can be unlinked from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryOwner {
    Film(DbId),
    PressItem(DbId),
}
