use std::path::PathBuf;

/// An error type for the imgproc crate.
#[derive(thiserror::Error, Debug)]
pub enum ImgprocError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(PathBuf),

    /// Error when the directory does not exist.
    #[error("Directory does not exist: {0}")]
    DirectoryNotFound(PathBuf),

    /// Invalid file extension.
    #[error("File does not have a valid extension: {0}")]
    InvalidFileExtension(PathBuf),

    /// Error to open the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error walking a directory.
    #[error("Failed to scan the directory. {0}")]
    WalkError(#[from] walkdir::Error),

    /// Error to decode the image.
    #[error("Failed to decode the image. {0}")]
    ImageDecodeError(#[from] image::ImageError),

    /// Error to encode the PNG image.
    #[error("Failed to encode the png image. {0}")]
    PngEncodingError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    ThreadPoolError(String),
}
