use crate::utils::parse_size;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "img-shrink",
    about = "Re-compress oversized JPEG images in place until they fit a size budget",
    long_about = "img-shrink walks a directory tree and re-encodes every JPEG larger than the size budget. \
                  Each oversized file is saved over itself at quality 95, 90, 85, ... until it fits \
                  or the quality would drop to 10 or below. Files already within budget are left untouched.",
    version,
    after_help = "EXAMPLES:\n  \
    img-shrink ./images\n  \
    img-shrink ./photos --max-size 500K\n  \
    img-shrink \"./albums/**/*.jpg\" -s 2MB -q 10"
)]
pub struct Args {
    #[arg(
        help = "Input directory, JPEG file, or glob pattern",
        long_help = "Directories are walked recursively. Only .jpg and .jpeg files \
                     (any letter case) are considered."
    )]
    pub input: String,

    #[arg(
        short = 's',
        long,
        value_parser = parse_size_arg,
        help = "Size budget per file (default: 1MB)",
        long_help = "Maximum size a file may have after compression. Accepts plain bytes or a \
                     suffixed value such as 500K, 1MB or 2MiB. All suffixes are powers of 1024."
    )]
    pub max_size: Option<u64>,

    #[arg(
        short = 'q',
        long,
        value_parser = clap::value_parser!(u8).range(1..=100),
        help = "Quality decrease per attempt (1-100, default: 5)"
    )]
    pub quality_step: Option<u8>,

    #[arg(long, help = "Only print errors")]
    pub quiet: bool,

    #[arg(short = 'v', long, help = "Print decoder details for each processed file")]
    pub verbose: bool,
}

fn parse_size_arg(value: &str) -> Result<u64, String> {
    parse_size(value).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_defaults() {
        let args = Args::try_parse_from(["img-shrink", "./images"]).unwrap();
        assert_eq!(args.input, "./images");
        assert_eq!(args.max_size, None);
        assert_eq!(args.quality_step, None);
        assert!(!args.quiet);
        assert!(!args.verbose);
    }

    #[test]
    fn test_parse_size_and_step() {
        let args =
            Args::try_parse_from(["img-shrink", "pics", "--max-size", "500K", "-q", "10"]).unwrap();
        assert_eq!(args.max_size, Some(500 * 1024));
        assert_eq!(args.quality_step, Some(10));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Args::try_parse_from(["img-shrink", "pics", "-s", "lots"]).is_err());
        assert!(Args::try_parse_from(["img-shrink", "pics", "-q", "0"]).is_err());
        assert!(Args::try_parse_from(["img-shrink", "pics", "-q", "101"]).is_err());
        assert!(Args::try_parse_from(["img-shrink"]).is_err());
    }
}
