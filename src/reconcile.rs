//! Copy alignment files while leaving out known-bad ones.
//!
//! Every input file is either copied to the output directory or counted as bad,
//! so `copied + bad` always equals the number of inputs. The copied count is
//! then checked against the count the bad-file registry implies; a mismatch
//! means the registry names files that are not in the input set.

use crate::discovery::{get_alignment_files, AlignmentFormat};
use crate::error::{LastzError, Result};
use crate::ini::BadFileRegistry;
use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Counters produced by one reconcile pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CopyOutcome {
    /// Files copied to the output directory
    pub copied: usize,
    /// Files skipped because they are in the bad-file registry
    pub bad: usize,
}

impl CopyOutcome {
    pub fn total(&self) -> usize {
        self.copied + self.bad
    }
}

/// Copy every file whose basename is not in `bad_files` into `output_dir`.
///
/// Sources are never modified. Existing destinations with the same name are
/// overwritten. A copy failure aborts immediately and leaves already copied
/// files in place. After the loop, the number of copied files must equal
/// `expected_copy_count`, otherwise [`LastzError::ReconciliationMismatch`] is
/// returned (again leaving the copies in place).
pub fn reconcile_and_copy<P: AsRef<Path>>(
    files: &[P],
    bad_files: &BadFileRegistry,
    output_dir: &Path,
    expected_copy_count: i64,
) -> Result<CopyOutcome> {
    let mut outcome = CopyOutcome::default();
    let mut copied_names: HashSet<&OsStr> = HashSet::new();

    for file in files {
        let file = file.as_ref();
        let name = basename(file)?;

        // Registry keys are UTF-8, so a name that is not can never be bad
        if name.to_str().is_some_and(|n| bad_files.contains(n)) {
            log::debug!("Skipping bad file {}", file.display());
            outcome.bad += 1;
            continue;
        }

        if !copied_names.insert(name) {
            log::warn!(
                "{} appears more than once in the input; {} overwrites the earlier copy",
                name.to_string_lossy(),
                file.display()
            );
        }

        fs::copy(file, output_dir.join(name))?;
        outcome.copied += 1;
    }

    if outcome.copied as i64 != expected_copy_count {
        return Err(LastzError::ReconciliationMismatch {
            expected: expected_copy_count,
            copied: outcome.copied,
        });
    }

    Ok(outcome)
}

fn basename(path: &Path) -> Result<&OsStr> {
    path.file_name().ok_or_else(|| {
        LastzError::IoError(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} has no file name", path.display()),
        ))
    })
}

/// Everything `remove_bad_files` needs, passed explicitly.
#[derive(Debug, Clone)]
pub struct RemoveBadConfig {
    /// Configuration file holding the bad-file list
    pub config_path: PathBuf,
    /// Section of the configuration file whose keys are bad file names
    pub section: String,
    /// Directory holding the alignment files
    pub alignments_dir: PathBuf,
    /// Format of the alignment files
    pub input_format: AlignmentFormat,
    /// Directory to copy good alignments into
    pub output_dir: PathBuf,
}

/// Copy the good alignments of a directory, leaving out those listed as bad.
pub fn remove_bad_files(config: &RemoveBadConfig) -> Result<CopyOutcome> {
    let bad_files = BadFileRegistry::load(&config.config_path, &config.section)?;
    let files = get_alignment_files(&config.alignments_dir, config.input_format)?;

    log::info!("There are {} TOTAL files.", files.len());
    log::info!("There are {} BAD files.", bad_files.len());

    // Negative when the registry names more files than were found
    let expected = files.len() as i64 - bad_files.len() as i64;

    if !config.output_dir.exists() {
        fs::create_dir_all(&config.output_dir)?;
    }

    let outcome = reconcile_and_copy(&files, &bad_files, &config.output_dir, expected)?;
    log::info!(
        "Copied {} files.  Did not copy {} files.",
        outcome.copied,
        outcome.bad
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::{tempdir, TempDir};

    fn make_inputs(names: &[&str]) -> (TempDir, Vec<PathBuf>) {
        let dir = tempdir().unwrap();
        let files = names
            .iter()
            .map(|name| {
                let path = dir.path().join(name);
                fs::write(&path, format!(">{name}\nACGT\n")).unwrap();
                path
            })
            .collect();
        (dir, files)
    }

    fn listing(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_skips_bad_files() {
        let (input, files) = make_inputs(&["a.fa", "b.fa", "c.fa"]);
        let output = tempdir().unwrap();
        let bad = BadFileRegistry::from_keys(["b.fa"]);

        let outcome = reconcile_and_copy(&files, &bad, output.path(), 2).unwrap();

        assert_eq!(outcome, CopyOutcome { copied: 2, bad: 1 });
        assert_eq!(listing(output.path()), vec!["a.fa", "c.fa"]);
        for name in ["a.fa", "c.fa"] {
            assert_eq!(
                fs::read(input.path().join(name)).unwrap(),
                fs::read(output.path().join(name)).unwrap()
            );
        }
        // sources untouched
        assert_eq!(listing(input.path()), vec!["a.fa", "b.fa", "c.fa"]);
    }

    #[test]
    fn test_unmatched_bad_name_fails_after_copying() {
        let (_input, files) = make_inputs(&["a.fa"]);
        let output = tempdir().unwrap();
        let bad = BadFileRegistry::from_keys(["z.fa"]);

        let err = reconcile_and_copy(&files, &bad, output.path(), 0).unwrap_err();

        assert!(matches!(
            err,
            LastzError::ReconciliationMismatch {
                expected: 0,
                copied: 1
            }
        ));
        assert_eq!(listing(output.path()), vec!["a.fa"]);
    }

    #[test]
    fn test_rerun_overwrites() {
        let (_input, files) = make_inputs(&["a.fa", "b.fa", "c.fa"]);
        let output = tempdir().unwrap();
        let bad = BadFileRegistry::from_keys(["c.fa"]);

        let first = reconcile_and_copy(&files, &bad, output.path(), 2).unwrap();
        let second = reconcile_and_copy(&files, &bad, output.path(), 2).unwrap();

        assert_eq!(first, second);
        assert_eq!(listing(output.path()), vec!["a.fa", "b.fa"]);
    }

    #[test]
    fn test_duplicate_basenames_overwrite() {
        let (first_dir, mut files) = make_inputs(&["a.fa"]);
        let (second_dir, more) = make_inputs(&["a.fa"]);
        fs::write(second_dir.path().join("a.fa"), b">second\n").unwrap();
        files.extend(more);
        let output = tempdir().unwrap();

        let outcome =
            reconcile_and_copy(&files, &BadFileRegistry::default(), output.path(), 2).unwrap();

        assert_eq!(outcome, CopyOutcome { copied: 2, bad: 0 });
        assert_eq!(listing(output.path()), vec!["a.fa"]);
        assert_eq!(fs::read(output.path().join("a.fa")).unwrap(), b">second\n");
        drop(first_dir);
    }

    #[test]
    fn test_missing_output_dir_aborts() {
        let (_input, files) = make_inputs(&["a.fa", "b.fa"]);
        let output = tempdir().unwrap();
        let missing = output.path().join("missing");

        let err = reconcile_and_copy(&files, &BadFileRegistry::default(), &missing, 2).unwrap_err();
        assert!(matches!(err, LastzError::IoError(_)));
    }

    #[test]
    fn test_remove_bad_files_workflow() {
        let (input, _files) = make_inputs(&["uce-1.nexus", "uce-2.nexus", "uce-3.nexus"]);
        fs::write(input.path().join("README.txt"), b"ignored").unwrap();

        let work = tempdir().unwrap();
        let conf = work.path().join("bad.conf");
        fs::write(&conf, "[bad]\nuce-2.nexus = too few taxa\n").unwrap();

        let config = RemoveBadConfig {
            config_path: conf,
            section: "bad".to_string(),
            alignments_dir: input.path().to_path_buf(),
            input_format: AlignmentFormat::Nexus,
            output_dir: work.path().join("clean"),
        };

        let outcome = remove_bad_files(&config).unwrap();
        assert_eq!(outcome, CopyOutcome { copied: 2, bad: 1 });
        assert_eq!(
            listing(&config.output_dir),
            vec!["uce-1.nexus", "uce-3.nexus"]
        );
    }

    #[test]
    fn test_registry_larger_than_inputs_fails_after_copying() {
        let (input, _files) = make_inputs(&["a.fa"]);
        let work = tempdir().unwrap();
        let conf = work.path().join("bad.conf");
        fs::write(&conf, "[bad]\ny.fa\nz.fa\n").unwrap();

        let config = RemoveBadConfig {
            config_path: conf,
            section: "bad".to_string(),
            alignments_dir: input.path().to_path_buf(),
            input_format: AlignmentFormat::Fasta,
            output_dir: work.path().join("clean"),
        };

        let err = remove_bad_files(&config).unwrap_err();
        assert!(matches!(
            err,
            LastzError::ReconciliationMismatch {
                expected: -1,
                copied: 1
            }
        ));
        assert_eq!(listing(&config.output_dir), vec!["a.fa"]);
    }

    #[test]
    fn test_copy_failure_aborts_mid_loop() {
        let (input, files) = make_inputs(&["a.fa", "b.fa", "c.fa"]);
        fs::remove_file(input.path().join("b.fa")).unwrap();
        let output = tempdir().unwrap();

        let err = reconcile_and_copy(&files, &BadFileRegistry::default(), output.path(), 3)
            .unwrap_err();

        assert!(matches!(err, LastzError::IoError(_)));
        assert_eq!(listing(output.path()), vec!["a.fa"]);
        assert!(!output.path().join("c.fa").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_name_preserved() {
        use std::os::unix::ffi::OsStrExt;

        let input = tempdir().unwrap();
        let name = OsStr::from_bytes(b"a\xff.fa");
        let source = input.path().join(name);
        // Some filesystems refuse non-UTF-8 names
        if fs::write(&source, b">a\nACGT\n").is_err() {
            return;
        }
        let output = tempdir().unwrap();

        let files = std::slice::from_ref(&source);
        let outcome =
            reconcile_and_copy(files, &BadFileRegistry::default(), output.path(), 1).unwrap();

        assert_eq!(outcome, CopyOutcome { copied: 1, bad: 0 });
        let copied: Vec<Vec<u8>> = fs::read_dir(output.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().as_bytes().to_vec())
            .collect();
        assert_eq!(copied, vec![b"a\xff.fa".to_vec()]);
        assert_eq!(fs::read(output.path().join(name)).unwrap(), b">a\nACGT\n");
    }
}
