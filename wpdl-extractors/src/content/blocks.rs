use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use wpdl_common::{ImageDescriptor, ImageOrigin};

use super::{ContentExtractor, PostContext};

static IMAGE_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)wp:image.*?"url":"([^"]+)""#).unwrap());

static GALLERY_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)wp:gallery.*?"url":"([^"]+)""#).unwrap());

static COVER_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)wp:cover.*?"url":"([^"]+)""#).unwrap());

/// Finds the `"url":"…"` attribute of Gutenberg image, gallery and cover blocks.
///
/// Matching is line-bound and non-nested: each pattern takes the first `"url"` after a block
/// name on the same line.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockExtractor;

impl BlockExtractor {
    pub fn scan(ctx: &PostContext<'_>, content: &str) -> Vec<ImageDescriptor> {
        [&IMAGE_BLOCK_RE, &GALLERY_BLOCK_RE, &COVER_BLOCK_RE]
            .into_iter()
            .flat_map(|re| re.captures_iter(content))
            .filter_map(|caps| {
                let url = caps.get(1)?.as_str().replace("\\/", "/");
                ctx.tagged(&url, ImageOrigin::Block, None)
            })
            .collect()
    }
}

#[async_trait]
impl ContentExtractor for BlockExtractor {
    fn origin(&self) -> ImageOrigin {
        ImageOrigin::Block
    }

    async fn extract(&self, ctx: &PostContext<'_>, content: &str) -> Vec<ImageDescriptor> {
        Self::scan(ctx, content)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use wpdl_common::SiteUrl;

    fn scan(content: &str) -> Vec<ImageDescriptor> {
        let site = SiteUrl::from_input("https://example.com").unwrap();
        let ctx = PostContext {
            site: &site,
            post_title: "Blocks",
            post_id: 4,
        };
        BlockExtractor::scan(&ctx, content)
    }

    #[test]
    fn unescapes_json_slashes() {
        let images =
            scan(r#"<!-- wp:image {"id":77,"url":"https:\/\/example.com\/uploads\/x.jpg"} -->"#);

        assert_eq!(images.len(), 1);
        assert_eq!(images[0].url, "https://example.com/uploads/x.jpg");
        assert_eq!(images[0].img_class, vec!["wp-block-image"]);
        assert_eq!(images[0].origin, ImageOrigin::Block);
    }

    #[test]
    fn cover_and_gallery_blocks_are_found() {
        let content = concat!(
            "<!-- wp:cover {\"url\":\"\\/uploads\\/cover.png\",\"dimRatio\":50} -->\n",
            "<!-- WP:GALLERY {\"url\":\"//cdn.example.net/g.png\"} -->\n",
        );

        let urls: Vec<String> = scan(content).into_iter().map(|i| i.url).collect();
        assert_eq!(
            urls,
            vec![
                "https://cdn.example.net/g.png".to_string(),
                "https://example.com/uploads/cover.png".to_string(),
            ]
        );
    }

    #[test]
    fn block_without_url_is_ignored() {
        assert!(scan(r#"<!-- wp:image {"id":3,"sizeSlug":"large"} -->"#).is_empty());
    }
}
