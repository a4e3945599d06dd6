use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueueError {
    #[error("Failed to create destination directory. error: {message}")]
    DirCreationError { message: String },
}
