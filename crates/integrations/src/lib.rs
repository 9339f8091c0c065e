//! Clients for the external services the dashboard calls: object storage
//! on the CDN, text generation, background removal and page screenshots.
//!
//! Each service sits behind an `async_trait` so the HTTP layer holds
//! `Arc<dyn Trait>` and tests can substitute fakes.

pub mod background;
pub mod config;
pub mod error;
pub mod fetch;
pub mod html;
pub mod prompts;
pub mod screenshot;
pub mod storage;
pub mod text;

pub use background::{BackgroundRemover, ClaidClient};
pub use config::IntegrationsConfig;
pub use error::IntegrationError;
pub use fetch::{Fetcher, HttpFetcher};
pub use screenshot::{ScreenshotOneClient, ScreenshotProvider};
pub use storage::{BunnyStorage, ObjectStorage};
pub use text::{DeepSeekClient, TextGenerator};
