pub use crate::content::{ContentExtractor, ImageScanner, PostContext};
pub use crate::error::ExtractorError;
pub use crate::extractor_config::ServerConfig;
pub use crate::websites::wordpress::{PostPage, WordPressExtractor};
pub use crate::websites::MediaResolver;
