use serde::{Deserialize, Serialize};

/// Header carrying the number of pages of the queried collection.
pub const TOTAL_PAGES_HEADER: &str = "X-WP-TotalPages";

/// The part of a `/wp/v2/media/{id}` object needed to download the original file.
#[derive(Debug, Serialize, Deserialize)]
pub struct WordPressMedia {
    pub source_url: Option<String>,
}
