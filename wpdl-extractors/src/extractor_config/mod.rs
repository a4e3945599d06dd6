use std::fmt::Display;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use wpdl_common::DEFAULT_USER_AGENT;

/// Path of the posts collection, relative to the site root.
pub const POSTS_ENDPOINT: &str = "/wp-json/wp/v2/posts";

/// Path of the single-media endpoint, relative to the site root. The media ID is appended.
pub const MEDIA_ENDPOINT: &str = "/wp-json/wp/v2/media";

/// Largest page size the REST API accepts.
pub const MAX_PER_PAGE: u8 = 100;

const DEFAULT_PAGE_DELAY_MS: u64 = 500;

/// Settings for talking to a WordPress REST API.
///
/// Every field has a default, so a partial `[fetch]` table in the settings file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub user_agent: String,
    pub posts_endpoint: String,
    pub media_endpoint: String,
    pub per_page: u8,
    /// Pause between two post list pages, in milliseconds.
    pub page_delay_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            posts_endpoint: POSTS_ENDPOINT.to_string(),
            media_endpoint: MEDIA_ENDPOINT.to_string(),
            per_page: MAX_PER_PAGE,
            page_delay_ms: DEFAULT_PAGE_DELAY_MS,
        }
    }
}

impl ServerConfig {
    #[inline]
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    /// Page size actually sent to the API, clamped to `1..=100`.
    #[inline]
    pub fn page_size(&self) -> u8 {
        self.per_page.clamp(1, MAX_PER_PAGE)
    }
}

impl Display for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} per page, {}ms between pages)",
            self.posts_endpoint,
            self.page_size(),
            self.page_delay_ms
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn page_size_is_clamped() {
        let mut config = ServerConfig::default();
        assert_eq!(config.page_size(), 100);

        config.per_page = 0;
        assert_eq!(config.page_size(), 1);

        config.per_page = 250;
        assert_eq!(config.page_size(), 100);
    }

    #[test]
    fn partial_table_keeps_defaults() {
        let config: ServerConfig = serde_json::from_str(r#"{"page_delay_ms": 0}"#).unwrap();
        assert_eq!(config.page_delay(), Duration::ZERO);
        assert_eq!(config.posts_endpoint, POSTS_ENDPOINT);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }
}
