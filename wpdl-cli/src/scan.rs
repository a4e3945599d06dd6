//! Per-post image collection and the dry-run plan.
use std::fmt::Display;

use log::debug;
use wpdl_common::{short_title, ImageDescriptor, Post};
use wpdl_core::{dedupe, naming::FilenameRegistry};
use wpdl_extractors::content::ImageScanner;

/// Post titles are cut to this many chars in progress lines.
pub const TITLE_PREVIEW_LEN: usize = 50;

/// What scanning a single post turned up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostScan {
    /// `content.rendered` was missing or empty.
    NoContent,
    NoImages,
    Found(usize),
}

/// One progress line of the extraction stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSummary {
    /// 1-based position of the post in the fetched list.
    pub position: usize,
    pub total: usize,
    /// Title cut to [`TITLE_PREVIEW_LEN`] chars.
    pub title: String,
    pub scan: PostScan,
}

impl Display for PostSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}/{}] ", self.position, self.total)?;
        match self.scan {
            PostScan::NoContent => write!(f, "No content in: {}...", self.title),
            PostScan::NoImages => write!(f, "No images in: {}...", self.title),
            PostScan::Found(count) => write!(f, "Found {} images in: {}...", count, self.title),
        }
    }
}

/// Images of every post, before and after deduplication.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Number of references found, duplicates included.
    pub found: usize,
    pub unique: Vec<ImageDescriptor>,
}

/// Runs `scanner` over every post in order. `on_post` gets one summary per post.
pub async fn scan_posts<F>(scanner: &ImageScanner, posts: &[Post], mut on_post: F) -> ScanResult
where
    F: FnMut(&PostSummary),
{
    let total = posts.len();
    let mut all_images = Vec::new();

    for (idx, post) in posts.iter().enumerate() {
        let scan = if post.has_content() {
            let images = scanner
                .extract_images(post.content(), post.title(), post.id)
                .await;
            let count = images.len();
            all_images.extend(images);

            if count == 0 {
                PostScan::NoImages
            } else {
                PostScan::Found(count)
            }
        } else {
            PostScan::NoContent
        };

        on_post(&PostSummary {
            position: idx + 1,
            total,
            title: short_title!(post.title(), TITLE_PREVIEW_LEN),
            scan,
        });
    }

    let found = all_images.len();
    let unique = dedupe(all_images);
    debug!("{} posts scanned, {} images, {} unique", total, found, unique.len());

    ScanResult { found, unique }
}

/// File name and URL of each image, as a real run would name them.
///
/// Uses a fresh registry, the same way a new download queue starts.
pub fn dry_run_plan(images: &[ImageDescriptor]) -> Vec<(String, String)> {
    let mut names = FilenameRegistry::new();
    images
        .iter()
        .map(|image| (names.generate(&image.url), image.url.clone()))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use wpdl_common::post::Rendered;
    use wpdl_common::{ImageOrigin, SiteUrl};
    use wpdl_core::queue::{Queue, QueueOpts};
    use wpdl_extractors::content::InlineExtractor;

    fn scanner() -> ImageScanner {
        let site = SiteUrl::from_input("https://example.com").unwrap();
        ImageScanner::with_passes(site, vec![Box::new(InlineExtractor)])
    }

    fn post(id: u64, title: Option<&str>, content: Option<&str>) -> Post {
        Post {
            id,
            title: title.map(|t| Rendered {
                rendered: Some(t.to_string()),
            }),
            content: content.map(|c| Rendered {
                rendered: Some(c.to_string()),
            }),
        }
    }

    async fn summaries(posts: &[Post]) -> (ScanResult, Vec<PostSummary>) {
        let mut lines = Vec::new();
        let result = scan_posts(&scanner(), posts, |s| lines.push(s.clone())).await;
        (result, lines)
    }

    #[tokio::test]
    async fn post_without_content_is_reported() {
        let posts = [
            post(1, None, None),
            post(2, Some("Empty body"), Some("")),
            post(3, Some("Text only"), Some("<p>No pictures.</p>")),
        ];

        let (result, lines) = summaries(&posts).await;

        assert!(result.unique.is_empty());
        assert_eq!(lines[0].to_string(), "[1/3] No content in: Untitled...");
        assert_eq!(lines[1].scan, PostScan::NoContent);
        assert_eq!(lines[2].to_string(), "[3/3] No images in: Text only...");
    }

    #[tokio::test]
    async fn long_titles_are_cut() {
        let title = "A".repeat(80);
        let posts = [post(1, Some(&title), Some(r#"<img src="/a.png">"#))];

        let (_, lines) = summaries(&posts).await;

        assert_eq!(lines[0].title.chars().count(), TITLE_PREVIEW_LEN);
        assert_eq!(
            lines[0].to_string(),
            format!("[1/1] Found 1 images in: {}...", "A".repeat(50))
        );
    }

    #[tokio::test]
    async fn totals_count_duplicates_once() {
        let posts = [
            post(1, Some("One"), Some(r#"<img src="/a.png"><img src="/b.png">"#)),
            post(2, Some("Two"), Some(r#"<img src="/a.png">"#)),
        ];

        let (result, lines) = summaries(&posts).await;

        assert_eq!(result.found, 3);
        let urls: Vec<&str> = result.unique.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://example.com/a.png", "https://example.com/b.png"]
        );
        assert_eq!(lines[0].scan, PostScan::Found(2));
        assert_eq!(lines[1].scan, PostScan::Found(1));
    }

    #[tokio::test]
    async fn dry_run_names_match_downloaded_files() {
        let server = MockServer::start().await;
        let paths = ["/a/photo.jpg", "/b/photo.jpg", "/c/other"];
        for p in paths {
            Mock::given(method("GET"))
                .and(path(p))
                .respond_with(
                    ResponseTemplate::new(200)
                        .insert_header("content-type", "image/jpeg")
                        .set_body_bytes(vec![0xff, 0xd8, 0xff, 0xe0]),
                )
                .mount(&server)
                .await;
        }
        let images: Vec<ImageDescriptor> = paths
            .iter()
            .map(|p| {
                ImageDescriptor::tagged(
                    format!("{}{}", server.uri(), p),
                    "Post",
                    1,
                    ImageOrigin::Inline,
                    None,
                )
            })
            .collect();

        let plan = dry_run_plan(&images);
        let names: Vec<&str> = plan.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["photo.jpg", "photo_1.jpg", "other.jpg"]);

        let dir = TempDir::new().unwrap();
        let opts = QueueOpts {
            download_delay_ms: 0,
            ..QueueOpts::default()
        };
        let mut queue = Queue::new(
            opts.client("wpdl-test").unwrap(),
            dir.path().to_path_buf(),
            opts,
            None,
        );
        let report = queue.download_all(&images).await.unwrap();

        assert_eq!(report.successful, 3);
        for (name, _) in &plan {
            assert!(dir.path().join(name).exists(), "{name} was not written");
        }
    }
}
