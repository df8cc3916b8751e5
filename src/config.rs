//! Configuration options for lastz alignment runs.
//!
//! This module provides a builder pattern for configuring the thresholds passed
//! to lastz, along with the fixed tuning parameters used for UCE-style
//! target/query alignments.

use crate::error::{LastzError, Result};
use std::fmt;
use std::path::PathBuf;

/// Default minimum percent identity for a match.
pub const DEFAULT_IDENTITY: f64 = 92.5;

/// Default minimum percent coverage for a match.
pub const DEFAULT_COVERAGE: f64 = 83.0;

/// Columns requested from lastz's `general-` output format.
pub const OUTPUT_COLUMNS: &[&str] = &[
    "score",
    "name1",
    "strand1",
    "zstart1",
    "end1",
    "length1",
    "name2",
    "strand2",
    "zstart2",
    "end2",
    "length2",
    "diff",
    "cigar",
    "identity",
    "continuity",
];

/// Match acceptance criterion in addition to identity.
///
/// lastz accepts either a minimum coverage percentage or a minimum count of
/// matched bases, never both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchThreshold {
    /// Minimum percent of the query covered by the match (`--coverage`)
    Coverage(f64),
    /// Minimum number of matched base pairs (`--matchcount`)
    MinMatch(u64),
}

impl Default for MatchThreshold {
    fn default() -> Self {
        MatchThreshold::Coverage(DEFAULT_COVERAGE)
    }
}

impl MatchThreshold {
    /// Resolve the threshold from the two mutually exclusive command-line options.
    ///
    /// Supplying both is a configuration error. Supplying neither falls back to
    /// the default coverage.
    pub fn from_options(coverage: Option<f64>, min_match: Option<u64>) -> Result<Self> {
        match (coverage, min_match) {
            (Some(_), Some(_)) => Err(LastzError::InvalidConfig(
                "--coverage and --min_match are mutually exclusive".to_string(),
            )),
            (None, Some(count)) => Ok(MatchThreshold::MinMatch(count)),
            (Some(pct), None) => Ok(MatchThreshold::Coverage(pct)),
            (None, None) => Ok(MatchThreshold::default()),
        }
    }

    /// The lastz argument expressing this threshold.
    pub fn to_arg(&self) -> String {
        match self {
            MatchThreshold::Coverage(pct) => format!("--coverage={pct}"),
            MatchThreshold::MinMatch(count) => format!("--matchcount={count}"),
        }
    }
}

impl fmt::Display for MatchThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchThreshold::Coverage(pct) => write!(f, "coverage >= {pct}%"),
            MatchThreshold::MinMatch(count) => write!(f, "matchcount >= {count} bp"),
        }
    }
}

/// Configuration for a lastz alignment run.
///
/// # Default Values
/// - `identity`: 92.5%
/// - `threshold`: coverage 83.0%
/// - `hsp_threshold` / `gapped_threshold`: 3000
/// - `ydrop`: 9400
/// - `inner`: 0
/// - `gap_open` / `gap_extend`: 400 / 30
#[derive(Debug, Clone)]
pub struct Config {
    /// Minimum percent identity for a match
    pub identity: f64,

    /// Coverage or minimum match length
    pub threshold: MatchThreshold,

    /// Explicit path to the lastz binary (otherwise searched for)
    pub lastz_binary: Option<PathBuf>,

    /// Score threshold for high-scoring segment pairs (`--hspthresh`)
    pub hsp_threshold: u32,

    /// Score threshold for gapped alignments (`--gappedthresh`)
    pub gapped_threshold: u32,

    /// Extension termination threshold (`--ydrop`)
    pub ydrop: u32,

    /// Threshold for interpolated inner alignments (`--inner`)
    pub inner: u32,

    /// Gap open penalty
    pub gap_open: u32,

    /// Gap extension penalty
    pub gap_extend: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            identity: DEFAULT_IDENTITY,
            threshold: MatchThreshold::default(),
            lastz_binary: None,
            hsp_threshold: 3000,
            gapped_threshold: 3000,
            ydrop: 9400,
            inner: 0,
            gap_open: 400,
            gap_extend: 30,
        }
    }
}

impl Config {
    /// Creates a new configuration builder.
    ///
    /// # Example
    /// ```
    /// use lastz_rs::Config;
    ///
    /// let config = Config::builder()
    ///     .identity(90.0)
    ///     .min_match(100)
    ///     .build();
    /// ```
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Checks that every threshold is a usable value.
    pub fn validate(&self) -> Result<()> {
        check_percent("identity", self.identity)?;
        match self.threshold {
            MatchThreshold::Coverage(pct) => check_percent("coverage", pct)?,
            MatchThreshold::MinMatch(0) => {
                return Err(LastzError::InvalidConfig(
                    "min_match must be a positive number of base pairs".to_string(),
                ))
            }
            MatchThreshold::MinMatch(_) => {}
        }
        Ok(())
    }

    /// The `--format=general-:...` argument.
    pub fn format_arg(&self) -> String {
        format!("--format=general-:{}", OUTPUT_COLUMNS.join(","))
    }
}

fn check_percent(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(LastzError::InvalidConfig(format!(
            "{name} must be a percentage between 0 and 100, got {value}"
        )));
    }
    Ok(())
}

/// Builder for constructing Config instances.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Sets the minimum percent identity.
    ///
    /// Default: 92.5
    pub fn identity(mut self, identity: f64) -> Self {
        self.config.identity = identity;
        self
    }

    /// Requires a minimum percent coverage, replacing any match-count threshold.
    ///
    /// Default: 83.0
    pub fn coverage(mut self, coverage: f64) -> Self {
        self.config.threshold = MatchThreshold::Coverage(coverage);
        self
    }

    /// Requires a minimum number of matched base pairs, replacing coverage.
    pub fn min_match(mut self, count: u64) -> Self {
        self.config.threshold = MatchThreshold::MinMatch(count);
        self
    }

    /// Sets the match threshold directly.
    pub fn threshold(mut self, threshold: MatchThreshold) -> Self {
        self.config.threshold = threshold;
        self
    }

    /// Uses the given lastz binary instead of searching for one.
    pub fn lastz_binary(mut self, path: PathBuf) -> Self {
        self.config.lastz_binary = Some(path);
        self
    }

    /// Builds the final Config instance.
    pub fn build(self) -> Config {
        self.config
    }
}
