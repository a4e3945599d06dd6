//! Post extractor for any site exposing the WordPress REST API (`/wp-json/wp/v2`).
//!
//! The extractor has the following features:
//! - Full pagination of the posts collection, driven by the `X-WP-TotalPages` header
//! - Media lookup by ID, used by the gallery shortcode pass
//!
use self::models::{WordPressMedia, TOTAL_PAGES_HEADER};

use super::MediaResolver;
use crate::error::ExtractorError;
use crate::extractor_config::ServerConfig;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use tokio::time::{sleep, Instant};
use wpdl_common::{client, Post, SiteUrl};

pub mod models;

/// One page of the posts collection.
#[derive(Debug)]
pub struct PostPage {
    pub posts: Vec<Post>,
    /// Total number of pages advertised by the server.
    ///
    /// `None` if the header was present but unreadable.
    pub total_pages: Option<u32>,
}

/// Main object to read posts and media from a WordPress site
#[derive(Debug, Clone)]
pub struct WordPressExtractor {
    client: Client,
    site: SiteUrl,
    config: ServerConfig,
}

impl WordPressExtractor {
    /// Sets up the extractor with a client carrying the configured User-Agent.
    pub fn new(site: SiteUrl, config: ServerConfig) -> Result<Self, ExtractorError> {
        let client = client!(config.user_agent.as_str())?;
        Ok(Self::with_client(site, config, client))
    }

    /// Sets up the extractor around an already built client.
    pub fn with_client(site: SiteUrl, config: ServerConfig, client: Client) -> Self {
        debug!("Extractor for {site} using {config}");
        Self {
            client,
            site,
            config,
        }
    }

    /// Walks the posts collection page by page until an empty page comes back or the last
    /// advertised page was read.
    ///
    /// Any failure ends pagination but never the run: whatever was collected so far is returned.
    /// `on_page` is called with the page number and its post count after every successful page.
    pub async fn fetch_all_posts<F>(&self, mut on_page: F) -> Vec<Post>
    where
        F: FnMut(u32, usize),
    {
        let mut posts = Vec::with_capacity(self.config.page_size() as usize);
        let mut page = 1;

        loop {
            debug!("Scanning page {}", page);

            let page_data = match self.get_post_list(page).await {
                Ok(data) => data,
                Err(error) => {
                    warn!("Error fetching posts on page {page}: {error}");
                    break;
                }
            };

            let size = page_data.posts.len();

            if size == 0 {
                break;
            }

            posts.extend(page_data.posts);
            on_page(page, size);

            let Some(total_pages) = page_data.total_pages else {
                warn!("Unreadable {TOTAL_PAGES_HEADER} header on page {page}, stopping here");
                break;
            };

            if page >= total_pages {
                break;
            }

            page += 1;
            sleep(self.config.page_delay()).await;
        }

        debug!("Total posts retrieved: {}", posts.len());
        posts
    }

    /// Fetches a single page of the posts collection.
    pub async fn get_post_list(&self, page: u32) -> Result<PostPage, ExtractorError> {
        if page == 0 {
            return Err(ExtractorError::ZeroPage);
        }

        let url = self.site.endpoint(&self.config.posts_endpoint);
        debug!("Fetching posts from page {} of {}", page, url);

        let response = self
            .client
            .get(url)
            .query(&[
                ("page", page.to_string()),
                ("per_page", self.config.page_size().to_string()),
                ("_embed", String::from("false")),
            ])
            .send()
            .await?
            .error_for_status()?;

        let total_pages = match response.headers().get(TOTAL_PAGES_HEADER) {
            None => Some(1),
            Some(value) => value.to_str().ok().and_then(|v| v.trim().parse().ok()),
        };

        let raw_json = response.text().await?;

        let start_point = Instant::now();
        let posts = Self::map_posts(&raw_json)?;
        debug!("List size: {}", posts.len());
        debug!("Post mapping took {:?}", start_point.elapsed());

        Ok(PostPage { posts, total_pages })
    }

    /// Parses a raw posts collection body.
    pub fn map_posts(raw_json: &str) -> Result<Vec<Post>, ExtractorError> {
        Ok(serde_json::from_str::<Vec<Post>>(raw_json)?)
    }

    /// Looks up a media item and returns its `source_url`.
    pub async fn get_media(&self, media_id: u64) -> Result<String, ExtractorError> {
        let url = format!(
            "{}/{}",
            self.site.endpoint(&self.config.media_endpoint),
            media_id
        );
        debug!("Fetching media {}", url);

        let media: WordPressMedia = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        media
            .source_url
            .ok_or(ExtractorError::MissingSourceUrl { id: media_id })
    }
}

#[async_trait]
impl MediaResolver for WordPressExtractor {
    async fn resolve_media_url(&self, media_id: u64) -> Option<String> {
        match self.get_media(media_id).await {
            Ok(url) => Some(url),
            Err(error) => {
                debug!("Media {media_id} not resolved: {error}");
                None
            }
        }
    }
}
