//! Content extractors that find image references in the rendered HTML of a post.
//! # Extractors
//!
//! Three independent passes run over the same content, each implementing [`ContentExtractor`]:
//!
//! - [`InlineExtractor`](inline::InlineExtractor): plain `<img src>` tags.
//! - [`BlockExtractor`](blocks::BlockExtractor): `"url":"…"` fragments of Gutenberg image,
//!   gallery and cover blocks.
//! - [`ShortcodeExtractor`](shortcodes::ShortcodeExtractor): `[gallery ids]`, `[img src]` and
//!   `[image src]` shortcodes.
//!
//! [`ImageScanner`] runs all of them and concatenates their results. Nothing is deduplicated
//! at this stage.
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use wpdl_common::{ImageDescriptor, ImageOrigin, SiteUrl};

use crate::websites::MediaResolver;

pub mod blocks;
pub mod inline;
pub mod shortcodes;

pub use blocks::BlockExtractor;
pub use inline::InlineExtractor;
pub use shortcodes::ShortcodeExtractor;

/// Where a piece of content comes from.
#[derive(Debug, Clone, Copy)]
pub struct PostContext<'a> {
    /// Root used to resolve relative image references.
    pub site: &'a SiteUrl,
    pub post_title: &'a str,
    pub post_id: u64,
}

impl PostContext<'_> {
    /// Normalizes `reference` and wraps it in a descriptor tagged with `origin`.
    ///
    /// Returns `None` when the reference can't be made absolute.
    pub fn tagged(
        &self,
        reference: &str,
        origin: ImageOrigin,
        img_id: Option<String>,
    ) -> Option<ImageDescriptor> {
        let url = self.site.normalize(reference)?;
        Some(ImageDescriptor::tagged(
            url,
            self.post_title,
            self.post_id,
            origin,
            img_id,
        ))
    }
}

/// A single extraction pass. Passes never fail: a pass that finds nothing returns an empty list.
#[async_trait]
pub trait ContentExtractor: Send + Sync {
    /// The origin marker this pass stamps on its descriptors.
    fn origin(&self) -> ImageOrigin;

    async fn extract(&self, ctx: &PostContext<'_>, content: &str) -> Vec<ImageDescriptor>;
}

/// Runs every extraction pass over a post's content, in a fixed order.
pub struct ImageScanner {
    site: SiteUrl,
    passes: Vec<Box<dyn ContentExtractor>>,
}

impl ImageScanner {
    /// Sets up the inline, block and shortcode passes. Gallery IDs are resolved with `resolver`.
    pub fn new(site: SiteUrl, resolver: Arc<dyn MediaResolver>) -> Self {
        Self::with_passes(
            site,
            vec![
                Box::new(InlineExtractor),
                Box::new(BlockExtractor),
                Box::new(ShortcodeExtractor::new(resolver)),
            ],
        )
    }

    pub fn with_passes(site: SiteUrl, passes: Vec<Box<dyn ContentExtractor>>) -> Self {
        Self { site, passes }
    }

    /// Collects the images of one post from every pass, concatenated in pass order.
    pub async fn extract_images(
        &self,
        content: &str,
        post_title: &str,
        post_id: u64,
    ) -> Vec<ImageDescriptor> {
        if content.is_empty() {
            return Vec::new();
        }

        let ctx = PostContext {
            site: &self.site,
            post_title,
            post_id,
        };

        let mut images = Vec::new();
        for pass in &self.passes {
            let found = pass.extract(&ctx, content).await;
            debug!(
                "Post {}: {} {} image(s)",
                post_id,
                found.len(),
                pass.origin()
            );
            images.extend(found);
        }
        images
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct NoMedia;

    #[async_trait]
    impl MediaResolver for NoMedia {
        async fn resolve_media_url(&self, _media_id: u64) -> Option<String> {
            None
        }
    }

    fn scanner() -> ImageScanner {
        let site = SiteUrl::from_input("https://example.com").unwrap();
        ImageScanner::new(site, Arc::new(NoMedia))
    }

    #[tokio::test]
    async fn root_relative_img_is_made_absolute() {
        let images = scanner()
            .extract_images(r#"<img src="/wp-content/uploads/2024/a.png">"#, "A", 1)
            .await;

        assert_eq!(images.len(), 1);
        assert_eq!(
            images[0].url,
            "https://example.com/wp-content/uploads/2024/a.png"
        );
        assert_eq!(images[0].origin, ImageOrigin::Inline);
    }

    #[tokio::test]
    async fn passes_are_concatenated_in_order() {
        let content = concat!(
            r#"[img src="/short.png"]"#,
            r#"<!-- wp:image {"id":5,"url":"https:\/\/example.com\/block.png"} -->"#,
            r#"<figure><img src="https://example.com/inline.png"></figure>"#,
        );

        let images = scanner().extract_images(content, "Mixed", 9).await;
        let origins: Vec<ImageOrigin> = images.iter().map(|i| i.origin).collect();

        assert_eq!(
            origins,
            vec![ImageOrigin::Inline, ImageOrigin::Block, ImageOrigin::Shortcode]
        );
        assert!(images.iter().all(|i| i.post_id == 9 && i.post_title == "Mixed"));
        assert!(images.iter().all(|i| i.url.starts_with("https://")));
    }

    #[tokio::test]
    async fn duplicates_survive_extraction() {
        let content = r#"<img src="/a.png"><img src="/a.png">"#;
        let images = scanner().extract_images(content, "Dup", 2).await;
        assert_eq!(images.len(), 2);
    }

    #[tokio::test]
    async fn empty_content_yields_nothing() {
        assert!(scanner().extract_images("", "Empty", 3).await.is_empty());
    }
}
