use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    ImageProcessing(#[from] image::ImageError),

    #[error("Invalid quality step: {0}. Must be between 1 and 100")]
    InvalidQualityStep(u8),

    #[error("Invalid size threshold: {0} bytes. Must be greater than zero")]
    InvalidSizeThreshold(u64),

    #[error("Invalid size value: {0}")]
    InvalidSize(String),

    #[error("Not a JPEG file: {0}")]
    NotAJpeg(PathBuf),

    #[error("File is read-only: {0}")]
    ReadOnly(PathBuf),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Walkdir error: {0}")]
    WalkdirError(#[from] walkdir::Error),

    #[error("Invalid glob pattern: {0}")]
    GlobPattern(#[from] glob::PatternError),
}

pub type Result<T> = std::result::Result<T, CompressionError>;
