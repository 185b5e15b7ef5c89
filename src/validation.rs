use crate::batch::is_jpeg_file;
use crate::error::{CompressionError, Result};
use std::path::Path;

/// Check that `path` is an existing regular JPEG file the loop may rewrite.
pub fn validate_input_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(CompressionError::FileNotFound(path.to_path_buf()));
    }

    if !path.is_file() || !is_jpeg_file(path) {
        return Err(CompressionError::NotAJpeg(path.to_path_buf()));
    }

    Ok(())
}
