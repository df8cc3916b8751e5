//! Subprocess runner for the lastz binary
//!
//! This module builds the lastz command line from a [`Config`] and runs it as a
//! synchronous subprocess. lastz writes its alignments straight to the output
//! path, so the only thing we inspect afterwards is its error stream.

use crate::binary_finder::find_lastz;
use crate::config::Config;
use crate::error::{LastzError, Result};
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Outcome of a successful lastz run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Whatever lastz printed on stdout (normally nothing)
    pub stdout: String,
    /// Wall-clock time spent waiting on lastz
    pub elapsed: Duration,
}

/// Runs lastz alignments via subprocess
#[derive(Debug, Clone)]
pub struct Runner {
    pub config: Config,
}

impl Runner {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Align `query` against `target`, writing lastz output to `output`.
    ///
    /// Any text lastz writes to stderr is treated as a failure, warnings
    /// included. Nothing written to `output` is cleaned up on failure.
    pub fn align(&self, target: &Path, query: &Path, output: &Path) -> Result<RunReport> {
        self.config.validate()?;

        if !target.exists() {
            return Err(LastzError::FileNotFound(target.to_path_buf()));
        }
        if !query.exists() {
            return Err(LastzError::FileNotFound(query.to_path_buf()));
        }

        let lastz = find_lastz(self.config.lastz_binary.as_deref())?;
        let mut cmd = self.build_command(&lastz, target, query, output);

        log::info!(
            "Aligning {} against {} ({}, identity >= {}%)",
            query.display(),
            target.display(),
            self.config.threshold,
            self.config.identity
        );
        log::debug!("Executing: {cmd:?}");

        let start = Instant::now();
        let result = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                LastzError::ExecutionFailed(format!("failed to run {}: {e}", lastz.display()))
            })?;
        let elapsed = start.elapsed();

        let stderr = String::from_utf8_lossy(&result.stderr);
        if !stderr.is_empty() {
            return Err(LastzError::ExecutionFailed(stderr.into_owned()));
        }
        if !result.status.success() {
            return Err(LastzError::ExecutionFailed(format!(
                "lastz exited with {}",
                result.status
            )));
        }

        log::info!("lastz finished in {:.2}s", elapsed.as_secs_f64());

        Ok(RunReport {
            stdout: String::from_utf8_lossy(&result.stdout).into_owned(),
            elapsed,
        })
    }

    /// Build the lastz command line without running it.
    pub fn build_command(
        &self,
        lastz: &Path,
        target: &Path,
        query: &Path,
        output: &Path,
    ) -> Command {
        let config = &self.config;
        let mut cmd = Command::new(lastz);

        cmd.arg(with_suffix(target, "[multiple,nameparse=full]"));
        cmd.arg(with_suffix(query, "[nameparse=full]"));

        cmd.arg(format!("--hspthresh={}", config.hsp_threshold));
        cmd.arg(format!("--gappedthresh={}", config.gapped_threshold));
        cmd.arg(format!("--ydrop={}", config.ydrop));
        cmd.arg(format!("--inner={}", config.inner));
        cmd.arg(format!("--gap={},{}", config.gap_open, config.gap_extend));

        let mut output_arg = OsString::from("--output=");
        output_arg.push(output.as_os_str());
        cmd.arg(output_arg);

        cmd.arg(config.format_arg());
        cmd.arg(config.threshold.to_arg());
        cmd.arg(format!("--identity={}", config.identity));

        cmd
    }
}

/// Append lastz sequence-file actions (`file[action,...]`) to a path.
fn with_suffix(path: &Path, suffix: &str) -> OsString {
    let mut arg = path.as_os_str().to_owned();
    arg.push(suffix);
    arg
}
