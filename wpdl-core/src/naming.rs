//! Local file names for downloaded images.
//!
//! Names come from the last path segment of the image URL and are made unique within a run by
//! appending `_1`, `_2`, … before the extension. The result depends on the order images are
//! processed in, not on their content.
use ahash::{HashSet, HashSetExt};
use log::debug;
use url::Url;

const DEFAULT_NAME: &str = "image.jpg";
const DEFAULT_STEM: &str = "image";
const DEFAULT_EXT: &str = ".jpg";

/// File names already handed out during this run.
#[derive(Debug, Clone, Default)]
pub struct FilenameRegistry {
    used: HashSet<String>,
}

impl FilenameRegistry {
    pub fn new() -> Self {
        Self {
            used: HashSet::new(),
        }
    }

    /// Derives a safe name for `url`, makes it unique against every name given out before,
    /// registers it and returns it.
    pub fn generate(&mut self, url: &str) -> String {
        let base = base_filename(url);

        let name = if self.used.contains(&base) {
            let (stem, ext) = split_extension(&base);
            let mut counter: u32 = 1;
            loop {
                let candidate = format!("{stem}_{counter}{ext}");
                if !self.used.contains(&candidate) {
                    break candidate;
                }
                counter += 1;
            }
        } else {
            base
        };

        debug!("Assigned file name {name} to {url}");
        self.used.insert(name.clone());
        name
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.used.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}

/// Sanitized file name for `url` before collision handling.
///
/// Only ASCII letters, digits, `.`, `-` and `_` survive. Names without an extension get `.jpg`.
pub fn base_filename(url: &str) -> String {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.to_string(),
    };

    let mut name = path.rsplit('/').next().unwrap_or_default();

    if let Some((before_query, _)) = name.split_once('?') {
        name = before_query;
    }

    let mut name = if name.is_empty() || name == "/" {
        String::from(DEFAULT_NAME)
    } else {
        name.to_string()
    };

    if !name.contains('.') {
        name.push_str(DEFAULT_EXT);
    }

    let sanitized: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();

    // Everything before the extension may have been stripped away.
    if sanitized.starts_with('.') {
        if sanitized.len() == 1 {
            return String::from(DEFAULT_NAME);
        }
        return format!("{DEFAULT_STEM}{sanitized}");
    }

    sanitized
}

/// Splits `name` into stem and extension (with its dot), like `photo` and `.jpg`.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}
