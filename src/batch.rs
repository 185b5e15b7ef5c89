use crate::constants::{JPEG_EXTENSIONS, SKIP_PREFIX, SUCCESS_PREFIX, SUMMARY_PREFIX};
use crate::error::Result;
use crate::shrink::{shrink_file, ShrinkOptions, ShrinkOutcome};
use crate::utils::{calculate_compression_ratio, create_progress_bar, format_file_size, format_kib};
use crate::{error, info, logger, verbose, warn};
use glob::glob;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use walkdir::WalkDir;

/// Running totals for one batch run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub scanned: usize,
    pub skipped: usize,
    pub compressed: usize,
    pub floor_reached: usize,
    pub failed: usize,
    pub bytes_before: u64,
    pub bytes_after: u64,
    pub elapsed: Duration,
}

impl BatchSummary {
    pub fn record(&mut self, outcome: &ShrinkOutcome) {
        self.scanned += 1;
        self.bytes_before += outcome.original_size();
        self.bytes_after += outcome.final_size();
        match outcome {
            ShrinkOutcome::Skipped { .. } => self.skipped += 1,
            ShrinkOutcome::Compressed { .. } => self.compressed += 1,
            ShrinkOutcome::FloorReached { .. } => self.floor_reached += 1,
        }
    }

    pub fn record_failure(&mut self) {
        self.scanned += 1;
        self.failed += 1;
    }

    /// Reduction across every file that was measured, in percent.
    pub fn compression_ratio(&self) -> f64 {
        calculate_compression_ratio(self.bytes_before, self.bytes_after)
    }

    fn print(&self) {
        info!("\n{} Batch Summary:", SUMMARY_PREFIX);
        info!("  📁 Files scanned: {}", self.scanned);
        info!("  ⏭️  Already within budget: {}", self.skipped);
        info!("  ✅ Compressed under budget: {}", self.compressed);
        if self.floor_reached > 0 {
            info!("  ⚠️  Still over budget at quality floor: {}", self.floor_reached);
        }
        if self.failed > 0 {
            info!("  ❌ Failed files: {}", self.failed);
        }
        info!(
            "  📊 Total size: {} → {}",
            format_file_size(self.bytes_before),
            format_file_size(self.bytes_after)
        );
        info!("  🎯 Overall compression ratio: {:.1}%", self.compression_ratio());
        info!("  ⏱️  Total time: {:.2?}", self.elapsed);
    }
}

/// Compresses every JPEG under `input`, one file at a time.
///
/// A file that fails is reported and counted, and the run moves on to the
/// next one; only a failure to enumerate `input` aborts the batch.
pub fn shrink_directory(input: &str, options: &ShrinkOptions) -> Result<BatchSummary> {
    info!("🚀 Starting batch compression...");
    info!("📁 Input: {}", input);
    info!(
        "🎯 Budget: {} per file, quality step {}",
        format_file_size(options.max_size),
        options.quality_step
    );

    let start_time = Instant::now();
    let files = collect_jpeg_files(input)?;
    let mut summary = BatchSummary::default();

    if files.is_empty() {
        warn!("No JPEG files found in the input path");
        return Ok(summary);
    }

    verbose!("Found {} JPEG files to check", files.len());

    let progress = create_progress_bar(files.len() as u64);
    logger::attach_progress(&progress);

    for path in &files {
        progress.set_message(
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
        );

        match shrink_file(path, options) {
            Ok(outcome) => {
                report_outcome(path, &outcome);
                summary.record(&outcome);
            }
            Err(e) => {
                error!("Failed to process {}: {}", path.display(), e);
                summary.record_failure();
            }
        }

        progress.inc(1);
    }

    progress.finish_and_clear();
    logger::detach_progress();

    summary.elapsed = start_time.elapsed();
    summary.print();

    Ok(summary)
}

fn report_outcome(path: &Path, outcome: &ShrinkOutcome) {
    match *outcome {
        ShrinkOutcome::Skipped { size } => {
            info!(
                "{} Skipped (within budget, {}): {}",
                SKIP_PREFIX,
                format_kib(size),
                path.display()
            );
        }
        ShrinkOutcome::Compressed {
            original_size,
            final_size,
            quality,
            ..
        } => {
            info!(
                "{} Compressed: {}, original {} → final {}, quality={}",
                SUCCESS_PREFIX,
                path.display(),
                format_kib(original_size),
                format_kib(final_size),
                quality
            );
        }
        ShrinkOutcome::FloorReached {
            original_size,
            final_size,
            quality,
            ..
        } => {
            warn!(
                "Quality floor reached: {}, original {} → final {}, quality={}",
                path.display(),
                format_kib(original_size),
                format_kib(final_size),
                quality
            );
        }
    }
}

/// Resolves `input` to the JPEG files to process.
///
/// * an existing file is returned as-is when it is a JPEG
/// * an existing directory is walked recursively, sorted by file name;
///   symlinks to files are included, symlinked directories are not entered
/// * anything else is treated as a glob pattern
pub fn collect_jpeg_files(input: &str) -> Result<Vec<PathBuf>> {
    let input_path = Path::new(input);

    if input_path.is_file() {
        return Ok(if is_jpeg_file(input_path) {
            vec![input_path.to_path_buf()]
        } else {
            Vec::new()
        });
    }

    let mut jpeg_files = Vec::new();

    if input_path.is_dir() {
        for entry in WalkDir::new(input_path).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            // path().is_file() follows symlinks to files.
            if path.is_file() && is_jpeg_file(path) {
                jpeg_files.push(path.to_path_buf());
            }
        }
    } else {
        for entry in glob(input)?.flatten() {
            if entry.is_file() && is_jpeg_file(&entry) {
                jpeg_files.push(entry);
            }
        }
    }

    Ok(jpeg_files)
}

pub fn is_jpeg_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext_lower = ext.to_lowercase();
            JPEG_EXTENSIONS.contains(&ext_lower.as_str())
        })
        .unwrap_or(false)
}
