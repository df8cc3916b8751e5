//! Alignment file discovery
//!
//! Finds the alignment files of a given format sitting directly inside a
//! directory. Formats map to the file extensions commonly used for them, so a
//! `fasta` scan also picks up `.fa`, `.fsa` and `.aln` files.

use crate::error::{LastzError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Alignment file formats understood by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum AlignmentFormat {
    Fasta,
    Nexus,
    Phylip,
    PhylipRelaxed,
    PhylipSequential,
    Clustal,
    Emboss,
    Stockholm,
}

impl AlignmentFormat {
    /// File extensions (with leading dot) associated with the format.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            AlignmentFormat::Fasta => &[".fasta", ".fsa", ".aln", ".fa"],
            AlignmentFormat::Nexus => &[".nexus", ".nex"],
            AlignmentFormat::Phylip => &[".phylip", ".phy"],
            AlignmentFormat::PhylipRelaxed => &[".phylip", ".phy", ".phylip-relaxed"],
            AlignmentFormat::PhylipSequential => &[".phylip", ".phy", ".phylip-sequential"],
            AlignmentFormat::Clustal => &[".clustal", ".clw"],
            AlignmentFormat::Emboss => &[".emboss"],
            AlignmentFormat::Stockholm => &[".stockholm"],
        }
    }

    fn matcher(&self) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for ext in self.extensions() {
            builder.add(Glob::new(&format!("*{ext}"))?);
        }
        Ok(builder.build()?)
    }
}

impl fmt::Display for AlignmentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AlignmentFormat::Fasta => "fasta",
            AlignmentFormat::Nexus => "nexus",
            AlignmentFormat::Phylip => "phylip",
            AlignmentFormat::PhylipRelaxed => "phylip-relaxed",
            AlignmentFormat::PhylipSequential => "phylip-sequential",
            AlignmentFormat::Clustal => "clustal",
            AlignmentFormat::Emboss => "emboss",
            AlignmentFormat::Stockholm => "stockholm",
        };
        f.write_str(name)
    }
}

/// Return the alignment files of `format` directly inside `dir`.
///
/// Subdirectories are not searched. Paths are returned sorted and without
/// duplicates.
pub fn get_alignment_files(dir: &Path, format: AlignmentFormat) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(LastzError::DirectoryNotFound(dir.to_path_buf()));
    }

    log::info!("Getting alignment files");
    let matcher = format.matcher()?;
    let mut files = BTreeSet::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if matcher.is_match(entry.file_name()) {
            files.insert(entry.into_path());
        }
    }

    log::debug!("Found {} {format} files in {}", files.len(), dir.display());
    Ok(files.into_iter().collect())
}
