//! HTTP handlers, one module per resource.
//!
//! Every mutating handler takes [`RequireEditor`](crate::middleware::rbac::RequireEditor)
//! or [`RequireAdmin`](crate::middleware::rbac::RequireAdmin) as its first
//! extractor and publishes a `ContentEvent` after the write commits.

pub mod ai;
pub mod auth;
pub mod content;
pub mod films;
pub mod home;
pub mod license;
pub mod media;
pub mod missions;
pub mod press;
pub mod public;
pub mod settings;
