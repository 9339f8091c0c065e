//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Multi-statement writes open their
//! own transaction; `*_inner` helpers take the caller's transaction.

pub mod content_repo;
pub mod film_repo;
pub mod hashtag_repo;
pub mod home_page_repo;
pub mod media_asset_repo;
pub mod mission_repo;
pub mod press_repo;
pub mod relation_graph;
pub mod reorder_repo;
pub mod site_settings_repo;
pub mod user_repo;

pub use content_repo::ContentRepo;
pub use film_repo::FilmRepo;
pub use hashtag_repo::HashtagRepo;
pub use home_page_repo::HomePageRepo;
pub use media_asset_repo::MediaAssetRepo;
pub use mission_repo::MissionRepo;
pub use press_repo::PressRepo;
pub use relation_graph::RelationGraph;
pub use reorder_repo::ReorderRepo;
pub use site_settings_repo::SiteSettingsRepo;
pub use user_repo::UserRepo;
