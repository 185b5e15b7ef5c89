use img_shrink::constants::{QUALITY_FLOOR, START_QUALITY};
use img_shrink::{is_jpeg_file, parse_size, CompressionError, QualitySchedule, ShrinkOptions};
use proptest::prelude::*;
use std::path::Path;

proptest! {
    #[test]
    fn schedule_starts_high_and_stays_above_floor(step in 1u8..=100u8) {
        let qualities: Vec<u8> = QualitySchedule::new(step).collect();

        prop_assert_eq!(qualities.first().copied(), Some(START_QUALITY));
        prop_assert!(qualities.iter().all(|&q| q > QUALITY_FLOOR));
    }

    #[test]
    fn schedule_decreases_by_step(step in 1u8..=100u8) {
        let qualities: Vec<u8> = QualitySchedule::new(step).collect();

        for pair in qualities.windows(2) {
            prop_assert_eq!(pair[0] - pair[1], step);
        }
    }

    #[test]
    fn schedule_is_exhaustive(step in 1u8..=100u8) {
        let qualities: Vec<u8> = QualitySchedule::new(step).collect();
        let expected_len = usize::from((START_QUALITY - QUALITY_FLOOR - 1) / step) + 1;

        prop_assert_eq!(qualities.len(), expected_len);
        // The next quality would be at or below the floor.
        let last = *qualities.last().unwrap();
        prop_assert!(last <= QUALITY_FLOOR + step);
    }

    #[test]
    fn shrink_options_accept_valid_values(
        max_size in 1u64..=u64::MAX,
        step in 1u8..=100u8
    ) {
        let options = ShrinkOptions::new(Some(max_size), Some(step)).unwrap();
        prop_assert_eq!(options.max_size, max_size);
        prop_assert_eq!(options.quality_step, step);
    }

    #[test]
    fn shrink_options_reject_out_of_range_step(step in 101u8..=255u8) {
        let result = ShrinkOptions::new(None, Some(step));
        prop_assert!(matches!(result, Err(CompressionError::InvalidQualityStep(s)) if s == step));
    }

    #[test]
    fn parse_size_plain_and_suffixed(value in 0u64..1_000_000u64) {
        prop_assert_eq!(parse_size(&value.to_string()).unwrap(), value);
        prop_assert_eq!(parse_size(&format!("{}K", value)).unwrap(), value * 1024);
        prop_assert_eq!(parse_size(&format!("{} MiB", value)).unwrap(), value * 1024 * 1024);
    }

    #[test]
    fn jpeg_extension_is_case_insensitive(
        stem in "[a-zA-Z0-9_-]{1,12}",
        ext in prop::sample::select(vec!["jpg", "JPG", "Jpg", "jpeg", "JPEG", "jPeG"])
    ) {
        let filename = format!("{}.{}", stem, ext);
        prop_assert!(is_jpeg_file(Path::new(&filename)));
    }

    #[test]
    fn other_extensions_are_not_jpeg(
        stem in "[a-zA-Z0-9_-]{1,12}",
        ext in prop::sample::select(vec!["png", "webp", "gif", "txt", "jp", "jpgx", "jfif"])
    ) {
        let filename = format!("{}.{}", stem, ext);
        prop_assert!(!is_jpeg_file(Path::new(&filename)));
    }
}
