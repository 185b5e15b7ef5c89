pub mod logger;

pub mod batch;
pub mod cli;
pub mod constants;
pub mod error;
pub mod shrink;
pub mod utils;
pub mod validation;

pub use batch::{collect_jpeg_files, is_jpeg_file, shrink_directory, BatchSummary};
pub use error::{CompressionError, Result};
pub use shrink::{
    encode_jpeg, load_jpeg, prepare_for_jpeg, shrink_file, write_in_place, QualitySchedule,
    ShrinkOptions, ShrinkOutcome,
};
pub use utils::{format_file_size, format_kib, parse_size};
