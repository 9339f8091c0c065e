//! Cache-invalidation events.
//!
//! - [`InvalidationBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`ContentEvent`]: "this content changed, these routes are stale".
//! - [`RevalidationForwarder`]: background task that POSTs stale routes to
//!   the public site's revalidation hook.

pub mod bus;
pub mod revalidate;

pub use bus::{ContentAction, ContentEvent, InvalidationBus};
pub use revalidate::{RevalidationForwarder, RevalidationError};
