//! Site root handling and the URL normalization rule applied by every extraction pass.
use std::fmt::Display;

use log::debug;
use url::Url;

use crate::error::SiteUrlError;

/// Root address of a WordPress site.
///
/// Keeps the address exactly as typed (minus trailing slashes) for building API endpoints
/// and a parsed [`Url`] for resolving relative image references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteUrl {
    raw: String,
    parsed: Url,
}

impl SiteUrl {
    /// Parses user input into a site root.
    ///
    /// Input is trimmed, `https://` is prepended when no `http(s)://` scheme is present and
    /// trailing `/` are dropped.
    pub fn from_input(input: &str) -> Result<Self, SiteUrlError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SiteUrlError::Empty);
        }

        let with_scheme = if has_http_scheme(trimmed) {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        };

        let raw = with_scheme.trim_end_matches('/').to_string();

        let parsed = Url::parse(&raw).map_err(|e| SiteUrlError::Invalid {
            input: input.to_string(),
            message: e.to_string(),
        })?;

        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(SiteUrlError::MissingHost {
                input: input.to_string(),
            });
        }

        debug!("Site root: {raw}");
        Ok(Self { raw, parsed })
    }

    /// The site root as a string without trailing slash.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Appends an absolute API path (e.g. `/wp-json/wp/v2/posts`) to the site root.
    #[inline]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.raw, path.trim_start_matches('/'))
    }

    /// Turns an image reference found in post content into an absolute URL.
    ///
    /// * `//host/path` gets an `https:` prefix and keeps its own host.
    /// * `/path` and any other reference without an `http(s)://` prefix are resolved
    ///   against the site root.
    /// * Fully qualified URLs are returned unchanged.
    ///
    /// Returns `None` only when the reference can't be resolved at all.
    pub fn normalize(&self, reference: &str) -> Option<String> {
        if reference.starts_with("//") {
            return Some(format!("https:{reference}"));
        }

        if has_http_scheme(reference) {
            return Some(reference.to_string());
        }

        match self.parsed.join(reference) {
            Ok(joined) => Some(joined.to_string()),
            Err(error) => {
                debug!("Failed to resolve {reference} against {}: {error}", self.raw);
                None
            }
        }
    }
}

impl Display for SiteUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

#[inline]
fn has_http_scheme(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}
