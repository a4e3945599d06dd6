use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Which extraction pass produced an [`ImageDescriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageOrigin {
    /// A plain `<img>` tag in the rendered HTML.
    Inline,
    /// A Gutenberg image, gallery or cover block.
    Block,
    /// A `[gallery]`, `[img]` or `[image]` shortcode.
    Shortcode,
}

impl ImageOrigin {
    /// Class marker attached to descriptors that don't come from a real `<img>` tag.
    #[inline]
    pub const fn marker(self) -> Option<&'static str> {
        match self {
            Self::Inline => None,
            Self::Block => Some("wp-block-image"),
            Self::Shortcode => Some("shortcode-image"),
        }
    }
}

impl Display for ImageOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inline => write!(f, "inline"),
            Self::Block => write!(f, "block"),
            Self::Shortcode => write!(f, "shortcode"),
        }
    }
}

/// One image reference discovered in a post.
///
/// `url` is always absolute and is the identity key used for deduplication.
/// The other fields are provenance kept for logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    pub url: String,
    pub post_title: String,
    pub post_id: u64,
    pub alt_text: Option<String>,
    pub img_class: Vec<String>,
    pub img_id: Option<String>,
    pub origin: ImageOrigin,
}

impl ImageDescriptor {
    /// Descriptor for a block or shortcode match, tagged with the origin's class marker.
    pub fn tagged(
        url: String,
        post_title: &str,
        post_id: u64,
        origin: ImageOrigin,
        img_id: Option<String>,
    ) -> Self {
        Self {
            url,
            post_title: post_title.to_string(),
            post_id,
            alt_text: None,
            img_class: origin.marker().map(String::from).into_iter().collect(),
            img_id,
            origin,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tagged_descriptor_carries_marker() {
        let desc = ImageDescriptor::tagged(
            "https://example.com/a.png".into(),
            "Post",
            3,
            ImageOrigin::Shortcode,
            Some("12".into()),
        );
        assert_eq!(desc.img_class, vec!["shortcode-image".to_string()]);
        assert_eq!(desc.img_id.as_deref(), Some("12"));
        assert_eq!(desc.alt_text, None);
    }
}
