//! Main representation of a WordPress post
//!
//! # Post
//! A [`Post` struct](Post) only carries the fields of the `/wp/v2/posts` API the extractors
//! consume. Everything else the API returns is ignored during deserialization.
use serde::{Deserialize, Serialize};

use std::{cmp::Ordering, fmt::Debug};

pub mod image;

const UNTITLED: &str = "Untitled";

/// Wrapper used by the REST API for server-rendered fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendered {
    #[serde(default)]
    pub rendered: Option<String>,
}

/// Catchall model for the parts of a WordPress post needed to find its images.
#[derive(Clone, Serialize, Deserialize, Eq)]
pub struct Post {
    /// ID number of the post given by the site
    pub id: u64,
    /// Rendered title, used for progress reporting only
    #[serde(default)]
    pub title: Option<Rendered>,
    /// Rendered HTML body, the only place images are searched for
    #[serde(default)]
    pub content: Option<Rendered>,
}

impl Debug for Post {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Post")
            .field("Post ID", &self.id)
            .field("Title", &self.title())
            .field("Content length", &self.content().len())
            .finish()
    }
}

impl Ord for Post {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl PartialOrd for Post {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Post {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Post {
    /// Rendered title, or `Untitled` when the API omitted it.
    #[inline]
    pub fn title(&self) -> &str {
        self.title
            .as_ref()
            .and_then(|t| t.rendered.as_deref())
            .unwrap_or(UNTITLED)
    }

    /// Rendered HTML content. Empty if the API omitted it.
    #[inline]
    pub fn content(&self) -> &str {
        self.content
            .as_ref()
            .and_then(|c| c.rendered.as_deref())
            .unwrap_or_default()
    }

    #[inline]
    pub fn has_content(&self) -> bool {
        !self.content().is_empty()
    }
}
