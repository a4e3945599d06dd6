use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use wpdl_common::{ImageDescriptor, ImageOrigin};

use super::{ContentExtractor, PostContext};

static IMG_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("img[src]").unwrap());

/// Finds every `<img>` tag with a non-empty `src` in the rendered HTML.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineExtractor;

impl InlineExtractor {
    /// Synchronous core of the pass. The parsed document is not `Send`, so it must not live
    /// inside a future.
    pub fn scan(ctx: &PostContext<'_>, content: &str) -> Vec<ImageDescriptor> {
        let document = Html::parse_fragment(content);

        document
            .select(&IMG_SELECTOR)
            .filter_map(|img| {
                let el = img.value();
                let src = el.attr("src").filter(|s| !s.is_empty())?;
                let url = ctx.site.normalize(src)?;

                Some(ImageDescriptor {
                    url,
                    post_title: ctx.post_title.to_string(),
                    post_id: ctx.post_id,
                    alt_text: el.attr("alt").map(String::from),
                    img_class: el.classes().map(String::from).collect(),
                    img_id: el.id().map(String::from),
                    origin: ImageOrigin::Inline,
                })
            })
            .collect()
    }
}

#[async_trait]
impl ContentExtractor for InlineExtractor {
    fn origin(&self) -> ImageOrigin {
        ImageOrigin::Inline
    }

    async fn extract(&self, ctx: &PostContext<'_>, content: &str) -> Vec<ImageDescriptor> {
        Self::scan(ctx, content)
    }
}
