//! Common models and helpers shared by every crate of the WordPress image downloader.
//!
//! The main types here are [`Post`](post::Post), the slice of a WordPress post the
//! extractors care about, and [`ImageDescriptor`](post::image::ImageDescriptor), the
//! unit passed from the extractors to the download queue.

// Public Exports
pub use log;
pub use reqwest;
pub use serde;
pub use serde_json;
pub use tokio;
pub use url;

pub mod error;
pub mod macros;
pub mod post;
pub mod site;

/// User-Agent sent on every request unless configured otherwise.
///
/// Some hosts reject unknown clients outright, so this mimics a desktop browser.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

pub use post::{image::ImageDescriptor, image::ImageOrigin, Post};
pub use site::SiteUrl;
