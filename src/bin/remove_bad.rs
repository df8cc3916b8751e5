//! Copy alignment files to a new directory, leaving out those listed as bad.

use anyhow::{Context, Result};
use clap::Parser;
use lastz_rs::logging::{banner, init_logging, Verbosity};
use lastz_rs::{remove_bad_files, AlignmentFormat, RemoveBadConfig};
use std::path::PathBuf;

const PROGRAM: &str = "remove_bad";

#[derive(Parser, Debug)]
#[command(name = "remove_bad")]
#[command(author, version, about = "Copy alignments, skipping those listed in a config section", long_about = None)]
struct Args {
    /// Config file whose section lists the bad alignment files
    #[arg(long)]
    config: PathBuf,

    /// Section of the config file holding the bad file names
    #[arg(long)]
    section: String,

    /// Directory containing the alignment files
    #[arg(long)]
    alignments: PathBuf,

    /// Format of the alignment files
    #[arg(long = "input_format", value_enum)]
    input_format: AlignmentFormat,

    /// Directory to copy the good alignments into
    #[arg(long)]
    output: PathBuf,

    /// Logging level
    #[arg(long, value_enum, default_value_t = Verbosity::Info)]
    verbosity: Verbosity,

    /// Directory to also write remove_bad.log into
    #[arg(long = "log-path")]
    log_path: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(PROGRAM, args.verbosity, args.log_path.as_deref())?;

    log::info!("{}", banner(&format!("Starting {PROGRAM}")));
    log::info!("Version: {}", env!("CARGO_PKG_VERSION"));
    log::info!("Argument --config: {}", args.config.display());
    log::info!("Argument --section: {}", args.section);
    log::info!("Argument --alignments: {}", args.alignments.display());
    log::info!("Argument --input_format: {}", args.input_format);
    log::info!("Argument --output: {}", args.output.display());

    let config = RemoveBadConfig {
        config_path: args.config,
        section: args.section,
        alignments_dir: args.alignments,
        input_format: args.input_format,
        output_dir: args.output,
    };

    remove_bad_files(&config).with_context(|| {
        format!(
            "Failed to copy alignments from {}",
            config.alignments_dir.display()
        )
    })?;

    log::info!("{}", banner(&format!("Completed {PROGRAM}")));
    Ok(())
}
