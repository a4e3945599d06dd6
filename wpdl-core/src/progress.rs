use std::fmt::Debug;
use std::sync::Arc;

/// Type of log event, used for styling messages in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogType {
    /// Image was skipped because it is already on disk or was already fetched.
    Skip,
    /// Image was downloaded.
    Success,
    /// Download of a single image failed.
    Error,
}

/// Trait for reporting overall progress of the download queue.
pub trait ProgressListener: Send + Sync + Debug {
    /// Sets the total number of images to process.
    fn set_main_total(&self, total: u64);
    /// Signals that one image has been processed, whatever the outcome.
    fn main_tick(&self);
    /// Signals that the queue is done.
    fn main_done(&self);

    /// Adds a new task for a single file transfer.
    ///
    /// `total_size` is the `Content-Length` of the response, if known.
    fn add_download_task(
        &self,
        name: String,
        total_size: Option<u64>,
    ) -> Box<dyn DownloadProgressUpdater>;

    /// Logs a categorized event message about `target` (usually a file name or URL).
    fn log_event(&self, log_type: LogType, target: &str, message: &str);
}

/// Trait for updating the progress of an individual file transfer.
pub trait DownloadProgressUpdater: Send + Sync + Debug {
    /// Sets the current number of bytes written for this task.
    fn set_progress(&self, bytes_downloaded: u64);
    /// Signals that this task is finished (successfully or not).
    fn finish(&self);
}

/// A no-operation implementation of `ProgressListener`.
#[derive(Debug, Clone)]
pub struct NoOpProgressListener;

impl ProgressListener for NoOpProgressListener {
    fn set_main_total(&self, _total: u64) {}
    fn main_tick(&self) {}
    fn main_done(&self) {}
    fn add_download_task(
        &self,
        _name: String,
        _total_size: Option<u64>,
    ) -> Box<dyn DownloadProgressUpdater> {
        Box::new(NoOpDownloadProgressUpdater)
    }
    fn log_event(&self, _log_type: LogType, _target: &str, _message: &str) {}
}

/// A no-operation implementation of `DownloadProgressUpdater`.
#[derive(Debug, Clone)]
pub struct NoOpDownloadProgressUpdater;

impl DownloadProgressUpdater for NoOpDownloadProgressUpdater {
    fn set_progress(&self, _bytes_downloaded: u64) {}
    fn finish(&self) {}
}

/// Convenience type alias for a shared, thread-safe progress listener.
pub type SharedProgressListener = Arc<dyn ProgressListener>;

/// Returns a shared instance of a `NoOpProgressListener`.
pub fn no_op_progress_listener() -> SharedProgressListener {
    Arc::new(NoOpProgressListener)
}
