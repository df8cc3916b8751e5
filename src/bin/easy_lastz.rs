//! Run lastz in an easy way.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::Parser;
use lastz_rs::config::DEFAULT_IDENTITY;
use lastz_rs::logging::{init_logging, Verbosity};
use lastz_rs::{Config, MatchThreshold, Runner};
use std::path::{Path, PathBuf};

const TIME_FORMAT: &str = "%a %b %d, %Y  %H:%M:%S";

#[derive(Parser, Debug)]
#[command(name = "easy_lastz")]
#[command(author, version, about = "Run lastz in an easy way", long_about = None)]
struct Args {
    /// The path to the target file (2bit/fasta)
    #[arg(long)]
    target: PathBuf,

    /// The path to the query file (2bit/fasta)
    #[arg(long)]
    query: PathBuf,

    /// The path to the output file
    #[arg(long)]
    output: PathBuf,

    /// The minimum percent identity to require for a match
    #[arg(long, default_value_t = DEFAULT_IDENTITY)]
    identity: f64,

    /// The minimum coverage (%) required for a match [default: 83.0]
    #[arg(long, conflicts_with = "min_match")]
    coverage: Option<f64>,

    /// The minimum number of base pairs required for a match
    #[arg(long = "min_match")]
    min_match: Option<u64>,

    /// Path to the lastz binary (default: $LASTZ, then PATH)
    #[arg(long)]
    lastz: Option<PathBuf>,
}

fn full_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()
        .context("Failed to read the current directory")?
        .join(path))
}

fn main() -> Result<()> {
    let start: DateTime<Local> = Local::now();
    println!("Started:  {}", start.format(TIME_FORMAT));

    let args = Args::parse();
    init_logging("easy_lastz", Verbosity::Warn, None)?;

    // clap rejects both flags as well
    let threshold = MatchThreshold::from_options(args.coverage, args.min_match)?;

    let mut builder = Config::builder().identity(args.identity).threshold(threshold);
    if let Some(lastz) = args.lastz {
        builder = builder.lastz_binary(full_path(&lastz)?);
    }
    let runner = Runner::new(builder.build());

    let target = full_path(&args.target)?;
    let query = full_path(&args.query)?;
    let output = full_path(&args.output)?;

    runner.align(&target, &query, &output).with_context(|| {
        format!(
            "lastz failed aligning {} to {}",
            query.display(),
            target.display()
        )
    })?;

    let end: DateTime<Local> = Local::now();
    println!("Ended:  {}", end.format(TIME_FORMAT));
    let minutes = (end - start).num_milliseconds() as f64 / 60_000.0;
    println!("Time for execution:  {minutes} minutes");

    Ok(())
}
