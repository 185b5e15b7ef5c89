/// Files larger than this are re-encoded (1 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;
pub const DEFAULT_QUALITY_STEP: u8 = 5;

/// First quality tried on an oversized file.
pub const START_QUALITY: u8 = 95;
/// Qualities at or below this are never attempted.
pub const QUALITY_FLOOR: u8 = 10;
pub const MAX_QUALITY_STEP: u8 = 100;

pub const JPEG_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

pub const PROGRESS_BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";
pub const PROGRESS_BAR_CHARS: &str = "=>-";

// Common output message prefixes
pub const SKIP_PREFIX: &str = "⏭️ ";
pub const ATTEMPT_PREFIX: &str = "🔄";
pub const SUCCESS_PREFIX: &str = "✅";
pub const SUMMARY_PREFIX: &str = "📊";
