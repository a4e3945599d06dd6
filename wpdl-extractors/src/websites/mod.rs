//! Modules that talk to a site's API and parse its answers into [Posts](wpdl_common::post::Post).
//!
//! Only the WordPress REST API is supported. Anything needing a lookup by media ID goes
//! through [`MediaResolver`], so content extractors can be exercised without a live site.
use async_trait::async_trait;

pub mod wordpress;

/// Capability to turn a numeric media identifier into the URL of the original file.
#[async_trait]
pub trait MediaResolver: Send + Sync {
    /// Returns the `source_url` of the media item, or `None` if it can't be resolved for any reason.
    async fn resolve_media_url(&self, media_id: u64) -> Option<String>;
}
