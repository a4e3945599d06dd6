//! Deduplication, file naming and the sequential download queue.
use ahash::{HashSet, HashSetExt};
use log::debug;
use std::path::Path;
use wpdl_common::ImageDescriptor;

pub mod error;
pub mod naming;
pub mod progress;
pub mod queue;

/// Collapses `images` to one entry per URL, keeping the first occurrence and its position.
///
/// URLs are compared as plain strings.
pub fn dedupe(images: Vec<ImageDescriptor>) -> Vec<ImageDescriptor> {
    let total = images.len();
    let mut seen: HashSet<String> = HashSet::with_capacity(total);

    let unique: Vec<ImageDescriptor> = images
        .into_iter()
        .filter(|img| seen.insert(img.url.clone()))
        .collect();

    debug!("Deduplicated {} images into {}", total, unique.len());
    unique
}

/// Absolute form of the destination folder for the final report.
#[inline]
pub fn display_output_path(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
