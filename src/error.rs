//! Error types for the lastz-rs library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for lastz-rs operations.
pub type Result<T> = std::result::Result<T, LastzError>;

/// Errors that can occur while running lastz or reconciling alignment files.
#[derive(Error, Debug)]
pub enum LastzError {
    /// Input file not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Input directory not found
    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// The external alignment binary could not be located
    #[error("{0} binary not found. Install lastz, put it in PATH, or set LASTZ")]
    BinaryNotFound(String),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error while scanning a directory
    #[error("Failed to scan directory: {0}")]
    WalkError(#[from] walkdir::Error),

    /// lastz wrote to its error stream or exited unsuccessfully
    #[error("lastz execution failed: {0}")]
    ExecutionFailed(String),

    /// Invalid configuration parameter
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Copied a different number of files than the bad-file registry implies
    #[error("Copied a different number of files than expected (expected {expected}, copied {copied})")]
    ReconciliationMismatch { expected: i64, copied: usize },

    /// Requested section absent from a configuration file
    #[error("Section [{section}] not found in {}", path.display())]
    MissingSection { path: PathBuf, section: String },

    /// Malformed configuration file
    #[error("Failed to parse {} at line {line}: {message}", path.display())]
    ConfigParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Invalid glob pattern built for a file format
    #[error("Invalid glob pattern: {0}")]
    InvalidPattern(String),
}

impl From<globset::Error> for LastzError {
    fn from(e: globset::Error) -> Self {
        LastzError::InvalidPattern(e.to_string())
    }
}
