use anyhow::Context;
use clap::Parser;
use img_shrink::cli::Args;
use img_shrink::{logger, shrink_directory, ShrinkOptions};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(args.quiet, args.verbose);

    let options = ShrinkOptions::new(args.max_size, args.quality_step)?;
    shrink_directory(&args.input, &options)
        .with_context(|| format!("failed to process input {}", args.input))?;

    Ok(())
}
