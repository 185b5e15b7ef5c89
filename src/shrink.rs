use crate::constants::{
    ATTEMPT_PREFIX, DEFAULT_MAX_FILE_SIZE, DEFAULT_QUALITY_STEP, MAX_QUALITY_STEP, QUALITY_FLOOR,
    START_QUALITY,
};
use crate::error::{CompressionError, Result};
use crate::utils::format_kib;
use crate::validation::validate_input_path;
use crate::{info, verbose};
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage, ImageReader};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShrinkOptions {
    pub max_size: u64,
    pub quality_step: u8,
}

impl ShrinkOptions {
    pub fn new(max_size: Option<u64>, quality_step: Option<u8>) -> Result<Self> {
        let max_size = max_size.unwrap_or(DEFAULT_MAX_FILE_SIZE);
        if max_size == 0 {
            return Err(CompressionError::InvalidSizeThreshold(max_size));
        }

        let quality_step = quality_step.unwrap_or(DEFAULT_QUALITY_STEP);
        if !(1..=MAX_QUALITY_STEP).contains(&quality_step) {
            return Err(CompressionError::InvalidQualityStep(quality_step));
        }

        Ok(Self {
            max_size,
            quality_step,
        })
    }

    pub fn schedule(&self) -> QualitySchedule {
        QualitySchedule::new(self.quality_step)
    }
}

impl Default for ShrinkOptions {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_FILE_SIZE,
            quality_step: DEFAULT_QUALITY_STEP,
        }
    }
}

/// Qualities to try, from [`START_QUALITY`] downwards in steps of `step`,
/// stopping before anything at or below [`QUALITY_FLOOR`].
///
/// # Example
/// ```
/// use img_shrink::QualitySchedule;
///
/// let qualities: Vec<u8> = QualitySchedule::new(30).collect();
/// assert_eq!(qualities, vec![95, 65, 35]);
/// ```
#[derive(Debug, Clone)]
pub struct QualitySchedule {
    next: Option<u8>,
    step: u8,
}

impl QualitySchedule {
    pub fn new(step: u8) -> Self {
        Self {
            next: Some(START_QUALITY),
            step: step.max(1),
        }
    }
}

impl Iterator for QualitySchedule {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let current = self.next.filter(|&q| q > QUALITY_FLOOR)?;
        self.next = current.checked_sub(self.step);
        Some(current)
    }
}

/// What the compression loop did to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShrinkOutcome {
    /// Already within budget; the file was not touched.
    Skipped { size: u64 },
    /// Re-encoded until it fit. `quality` is the last quality written.
    Compressed {
        original_size: u64,
        final_size: u64,
        quality: u8,
        attempts: usize,
    },
    /// Every allowed quality was tried and the file is still over budget.
    /// It is left at the lowest quality attempted.
    FloorReached {
        original_size: u64,
        final_size: u64,
        quality: u8,
        attempts: usize,
    },
}

impl ShrinkOutcome {
    pub fn original_size(&self) -> u64 {
        match *self {
            ShrinkOutcome::Skipped { size } => size,
            ShrinkOutcome::Compressed { original_size, .. }
            | ShrinkOutcome::FloorReached { original_size, .. } => original_size,
        }
    }

    pub fn final_size(&self) -> u64 {
        match *self {
            ShrinkOutcome::Skipped { size } => size,
            ShrinkOutcome::Compressed { final_size, .. }
            | ShrinkOutcome::FloorReached { final_size, .. } => final_size,
        }
    }

    pub fn final_quality(&self) -> Option<u8> {
        match *self {
            ShrinkOutcome::Skipped { .. } => None,
            ShrinkOutcome::Compressed { quality, .. }
            | ShrinkOutcome::FloorReached { quality, .. } => Some(quality),
        }
    }
}

/// Re-encodes `path` in place at decreasing quality until it fits under
/// `options.max_size` or the quality schedule runs out.
///
/// The image is decoded once and every attempt encodes from that decoded
/// copy, so quality loss does not compound between attempts. Each attempt
/// replaces the file atomically; the size checked is the size on disk.
///
/// # Returns
/// * `Ok(ShrinkOutcome::Skipped)` - file was already within budget
/// * `Ok(ShrinkOutcome::Compressed)` - file now fits the budget
/// * `Ok(ShrinkOutcome::FloorReached)` - lowest allowed quality still too big
/// * `Err(CompressionError)` - the file could not be read, decoded or written
pub fn shrink_file(path: &Path, options: &ShrinkOptions) -> Result<ShrinkOutcome> {
    validate_input_path(path)?;

    let original_size = fs::metadata(path)?.len();
    if original_size <= options.max_size {
        return Ok(ShrinkOutcome::Skipped {
            size: original_size,
        });
    }

    let img = prepare_for_jpeg(load_jpeg(path)?);
    verbose!(
        "Decoded {:?}: {}x{} {:?}",
        path,
        img.width(),
        img.height(),
        img.color()
    );

    let mut current_size = original_size;
    let mut last_quality = None;
    let mut attempts = 0;

    for quality in options.schedule() {
        if current_size <= options.max_size {
            break;
        }

        let encoded = encode_jpeg(&img, quality)?;
        current_size = write_in_place(path, &encoded)?;
        last_quality = Some(quality);
        attempts += 1;

        info!(
            "  {} quality={}, size={}",
            ATTEMPT_PREFIX,
            quality,
            format_kib(current_size)
        );
    }

    // START_QUALITY > QUALITY_FLOOR, so an oversized file always gets one attempt.
    let quality = last_quality.unwrap_or(START_QUALITY);

    if current_size <= options.max_size {
        Ok(ShrinkOutcome::Compressed {
            original_size,
            final_size: current_size,
            quality,
            attempts,
        })
    } else {
        Ok(ShrinkOutcome::FloorReached {
            original_size,
            final_size: current_size,
            quality,
            attempts,
        })
    }
}

/// Decodes the image at `path`, sniffing the format from content.
pub fn load_jpeg(path: &Path) -> Result<DynamicImage> {
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    Ok(img)
}

/// Converts `img` to a pixel layout the JPEG encoder accepts: 8-bit luma for
/// grayscale sources, 8-bit RGB for everything else.
pub fn prepare_for_jpeg(img: DynamicImage) -> DynamicImage {
    match img.color() {
        ColorType::L8 | ColorType::Rgb8 => img,
        ColorType::La8 | ColorType::L16 | ColorType::La16 => {
            DynamicImage::ImageLuma8(img.to_luma8())
        }
        _ => DynamicImage::ImageRgb8(img.to_rgb8()),
    }
}

/// Encodes `img` as a baseline JPEG at `quality` into memory.
pub fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
        match img {
            DynamicImage::ImageLuma8(gray) => encoder.encode_image(gray)?,
            DynamicImage::ImageRgb8(rgb) => encoder.encode_image(rgb)?,
            other => match prepare_for_jpeg(other.clone()) {
                DynamicImage::ImageLuma8(gray) => encoder.encode_image(&gray)?,
                prepared => encoder.encode_image(&prepared.to_rgb8())?,
            },
        }
    }

    Ok(buffer)
}

/// Replaces the contents of `path` with `bytes` and returns the new size on
/// disk.
///
/// The data goes to a temporary file in the same directory first and is then
/// renamed over the target, so an interrupted write leaves the old file.
/// Symlinks are resolved first so the link's target is rewritten and the link
/// itself stays in place. Permissions of the original file are carried over;
/// a read-only file is refused.
pub fn write_in_place(path: &Path, bytes: &[u8]) -> Result<u64> {
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let permissions = fs::metadata(&target).ok().map(|m| m.permissions());
    if permissions.as_ref().is_some_and(|p| p.readonly()) {
        return Err(CompressionError::ReadOnly(path.to_path_buf()));
    }

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    if let Some(permissions) = permissions {
        fs::set_permissions(tmp.path(), permissions)?;
    }
    tmp.persist(&target).map_err(|e| e.error)?;

    Ok(fs::metadata(&target)?.len())
}
