use thiserror::Error;

/// Enumerates the possible errors that can arise while talking to the WordPress REST API.
///
/// None of these abort a run: the post fetcher stops paginating on the first one and the
/// media resolver maps every one of them to "not found".
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// An attempt was made to fetch posts from page zero. The REST API pages start at 1.
    #[error("Page number cannot be zero.")]
    ZeroPage,

    /// An error occurred during a network request (e.g., connection timeout, DNS resolution failure).
    /// Also covers non-success statuses turned into errors by `error_for_status`.
    #[error("Connection Error: {0}")]
    ConnectionError(#[from] reqwest::Error),

    /// An error occurred while deserializing a JSON response from the API.
    #[error("Error while deserializing JSON: {0}")]
    JsonSerializeFail(#[from] serde_json::Error),

    /// The media object exists but carries no `source_url`.
    #[error("Media {id} has no source URL")]
    MissingSourceUrl { id: u64 },
}
