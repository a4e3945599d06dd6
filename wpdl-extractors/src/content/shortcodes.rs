use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use wpdl_common::{ImageDescriptor, ImageOrigin};

use super::{ContentExtractor, PostContext};
use crate::websites::MediaResolver;

// Galleries without an `ids` attribute are not matched.
static GALLERY_IDS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\[gallery[^\]]*ids="([^"]+)""#).unwrap());

static IMG_SRC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\[img[^\]]*src="([^"]+)""#).unwrap());

static IMAGE_SRC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\[image[^\]]*src="([^"]+)""#).unwrap());

/// Finds images referenced by shortcodes.
///
/// `[gallery ids="1,2"]` entries are looked up one by one through the [`MediaResolver`];
/// IDs that don't resolve are dropped. `[img src]` and `[image src]` carry their URL directly.
pub struct ShortcodeExtractor {
    resolver: Arc<dyn MediaResolver>,
}

impl ShortcodeExtractor {
    pub fn new(resolver: Arc<dyn MediaResolver>) -> Self {
        Self { resolver }
    }

    /// Parses the `ids` attribute of a gallery shortcode, keeping only all-digit tokens.
    pub fn media_ids(ids: &str) -> Vec<u64> {
        ids.split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()))
            .filter_map(|id| id.parse().ok())
            .collect()
    }

    async fn gallery_images(&self, ctx: &PostContext<'_>, content: &str) -> Vec<ImageDescriptor> {
        let id_lists: Vec<String> = GALLERY_IDS_RE
            .captures_iter(content)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
            .collect();

        let mut images = Vec::new();
        for media_id in id_lists.iter().flat_map(|ids| Self::media_ids(ids)) {
            match self.resolver.resolve_media_url(media_id).await {
                Some(url) => images.extend(ctx.tagged(
                    &url,
                    ImageOrigin::Shortcode,
                    Some(media_id.to_string()),
                )),
                None => debug!("Gallery media {media_id} of post {} not found", ctx.post_id),
            }
        }
        images
    }

    fn direct_images(ctx: &PostContext<'_>, content: &str) -> Vec<ImageDescriptor> {
        [&IMG_SRC_RE, &IMAGE_SRC_RE]
            .into_iter()
            .flat_map(|re| re.captures_iter(content))
            .filter_map(|caps| ctx.tagged(caps.get(1)?.as_str(), ImageOrigin::Shortcode, None))
            .collect()
    }
}

#[async_trait]
impl ContentExtractor for ShortcodeExtractor {
    fn origin(&self) -> ImageOrigin {
        ImageOrigin::Shortcode
    }

    async fn extract(&self, ctx: &PostContext<'_>, content: &str) -> Vec<ImageDescriptor> {
        let mut images = self.gallery_images(ctx, content).await;
        images.extend(Self::direct_images(ctx, content));
        images
    }
}
