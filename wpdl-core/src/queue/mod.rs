//! Provides the sequential download queue.
//!
//! The [`Queue`](crate::queue::Queue) owns the run context (URLs already downloaded and file
//! names already assigned), downloads every unique image one after another with a fixed pause
//! in between, and reports progress through a [`ProgressListener`](crate::progress::ProgressListener).
//!
//! A failed image is counted and the queue moves on. Nothing here aborts the batch except
//! failing to create the destination folder.

// Contains the logic for downloading and saving files to a directory.
mod folder;

use crate::error::QueueError;
use crate::naming::FilenameRegistry;
use crate::progress::{no_op_progress_listener, LogType, SharedProgressListener};
use ahash::{HashSet, HashSetExt};
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::create_dir_all;
use tokio::time::sleep;
use wpdl_common::{client, ImageDescriptor};

const DEFAULT_DOWNLOAD_DELAY_MS: u64 = 300;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Options for pacing and bounding downloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueOpts {
    /// Pause between two downloads, in milliseconds.
    pub download_delay_ms: u64,
    /// Timeout of a single image request, in seconds.
    pub timeout_secs: u64,
}

impl Default for QueueOpts {
    fn default() -> Self {
        Self {
            download_delay_ms: DEFAULT_DOWNLOAD_DELAY_MS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl QueueOpts {
    #[inline]
    pub fn download_delay(&self) -> Duration {
        Duration::from_millis(self.download_delay_ms)
    }

    /// Bound on connecting and on each read of a download, not on the whole transfer.
    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Builds the client used for image downloads, with [`timeout`](Self::timeout) applied.
    pub fn client(&self, user_agent: &str) -> Result<Client, reqwest::Error> {
        client!(user_agent, self.timeout())
    }
}

/// Why an image counted as a success without being fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A file with the generated name is already in the destination folder.
    FileExists,
    /// The URL was already saved earlier in this run under another name.
    UrlDownloaded,
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileExists => write!(f, "already exists"),
            Self::UrlDownloaded => write!(f, "URL already downloaded"),
        }
    }
}

/// Represents the outcome of a successful download attempt for a single image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadStatus {
    Downloaded { file_name: String },
    Skipped { file_name: String, reason: SkipReason },
}

/// Final tally of a queue run. Skipped images are also counted in `successful`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadReport {
    pub successful: u64,
    pub failed: u64,
    pub skipped: u64,
}

/// State scoped to one run. Never persisted; a new queue starts empty.
#[derive(Debug, Default)]
pub struct RunContext {
    pub downloaded_images: HashSet<String>,
    pub used_filenames: FilenameRegistry,
}

impl RunContext {
    pub fn new() -> Self {
        Self {
            downloaded_images: HashSet::new(),
            used_filenames: FilenameRegistry::new(),
        }
    }
}

/// Manages the sequential download of images into a single folder.
pub struct Queue {
    client: Client,
    output_dir: PathBuf,
    options: QueueOpts,
    context: RunContext,
    progress_listener: SharedProgressListener,
}

impl Queue {
    /// Set up the queue for download
    pub fn new(
        client: Client,
        output_dir: PathBuf,
        options: QueueOpts,
        progress_listener: Option<SharedProgressListener>,
    ) -> Self {
        let listener = progress_listener.unwrap_or_else(no_op_progress_listener);
        Self {
            client,
            output_dir,
            options,
            context: RunContext::new(),
            progress_listener: listener,
        }
    }

    #[inline]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    #[inline]
    pub fn context(&self) -> &RunContext {
        &self.context
    }

    /// Downloads every image in order, pausing between downloads.
    ///
    /// Per-image failures are counted in the report; only a failure to create the
    /// destination folder is returned as an error.
    pub async fn download_all(
        &mut self,
        images: &[ImageDescriptor],
    ) -> Result<DownloadReport, QueueError> {
        self.create_out().await?;

        let mut report = DownloadReport::default();
        self.progress_listener.set_main_total(images.len() as u64);

        for (idx, image) in images.iter().enumerate() {
            if idx > 0 {
                sleep(self.options.download_delay()).await;
            }

            match self.download(image).await {
                Ok(DownloadStatus::Downloaded { file_name }) => {
                    report.successful += 1;
                    self.progress_listener
                        .log_event(LogType::Success, &file_name, "Downloaded");
                }
                Ok(DownloadStatus::Skipped { file_name, reason }) => {
                    report.successful += 1;
                    report.skipped += 1;
                    self.progress_listener
                        .log_event(LogType::Skip, &file_name, &reason.to_string());
                }
                Err(error) => {
                    report.failed += 1;
                    debug!("Failed to download {} from post {}: {}", image.url, image.post_id, error);
                    self.progress_listener
                        .log_event(LogType::Error, &image.url, &error.to_string());
                }
            }

            self.progress_listener.main_tick();
        }

        self.progress_listener.main_done();
        Ok(report)
    }

    /// Creates the destination folder if it doesn't exist yet.
    async fn create_out(&self) -> Result<(), QueueError> {
        debug!("Target dir: {}", self.output_dir.display());
        match create_dir_all(&self.output_dir).await {
            Ok(_) => Ok(()),
            Err(error) => Err(QueueError::DirCreationError {
                message: error.to_string(),
            }),
        }
    }
}
