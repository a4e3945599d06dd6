use std::io;

use thiserror::Error;

/// Failures for a single image download. None of them abort the batch.
#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("Failed to access file: {source}")]
    FileIOError {
        #[from]
        source: io::Error,
    },

    #[error("Failed to connect to download URL: {source}")]
    ConnectionFail {
        #[from]
        source: reqwest::Error,
    },

    #[error("Server returned status {status}")]
    RemoteStatus { status: u16 },

    #[error("not an image: {content_type}")]
    NotAnImage { content_type: String },

    #[error("Error while fetching chunk: {message}")]
    ChunkDownloadFail { message: String },
}

/// Reasons a user-supplied site address can't be used as a crawl root.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SiteUrlError {
    #[error("Please provide a valid WordPress site URL.")]
    Empty,

    #[error("Invalid site URL {input}: {message}")]
    Invalid { input: String, message: String },

    #[error("Site URL {input} has no host")]
    MissingHost { input: String },
}
