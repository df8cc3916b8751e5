//! # lastz-rs: helpers for lastz alignment workflows
//!
//! This library backs two small command-line tools:
//!
//! - `easy_lastz` runs the external [lastz](https://github.com/lastz/lastz)
//!   aligner with the thresholds and tuning used for target/query probe
//!   matching, and treats anything lastz writes to stderr as a failure.
//! - `remove_bad` copies a directory of alignment files to a new location,
//!   leaving out the files named in a section of a configuration file, and
//!   checks that the number of copied files adds up.
//!
//! ## Example Usage
//!
//! ```no_run
//! # use anyhow::Result;
//! # fn main() -> Result<()> {
//! use lastz_rs::{Config, Runner};
//! use std::path::Path;
//!
//! let runner = Runner::new(Config::builder().identity(90.0).coverage(80.0).build());
//! let report = runner.align(
//!     Path::new("genome.2bit"),
//!     Path::new("probes.fasta"),
//!     Path::new("probes.lastz"),
//! )?;
//! println!("lastz took {:?}", report.elapsed);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - `config`: lastz thresholds and tuning parameters
//! - `binary_finder`: locating the lastz executable
//! - `runner`: building and running the lastz command
//! - `discovery`: finding alignment files of a format in a directory
//! - `ini`: reading bad-file lists from configuration sections
//! - `reconcile`: copying good files and checking the counts
//! - `logging`: logger setup for the binaries
//! - `error`: error types for the library

pub mod binary_finder;
pub mod config;
pub mod discovery;
pub mod error;
pub mod ini;
pub mod logging;
pub mod reconcile;
pub mod runner;

pub use config::{Config, MatchThreshold};
pub use discovery::{get_alignment_files, AlignmentFormat};
pub use error::{LastzError, Result};
pub use ini::BadFileRegistry;
pub use reconcile::{reconcile_and_copy, remove_bad_files, CopyOutcome, RemoveBadConfig};
pub use runner::{RunReport, Runner};
