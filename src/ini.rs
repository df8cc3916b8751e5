//! Reader for INI-style configuration files.
//!
//! Bad-file lists are kept as sections of a plain `key = value` configuration
//! file, with the alignment file name as the key and an optional free-form
//! note as the value:
//!
//! ```text
//! [bad]
//! uce-1041.nexus = too few taxa
//! uce-3352.nexus: duplicate locus
//! uce-701.nexus
//! ```
//!
//! Only the keys of a section are ever needed, so values are not kept.

use crate::error::{LastzError, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const DEFAULT_SECTION: &str = "DEFAULT";

/// Return the keys of `section` in order of first appearance.
///
/// Keys keep their case. Keys of a `[DEFAULT]` section are appended to the
/// requested section's keys when not already present.
pub fn read_section_keys(path: &Path, section: &str) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(LastzError::FileNotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)?;
    parse_section_keys(&text, section, path)
}

fn parse_section_keys(text: &str, section: &str, path: &Path) -> Result<Vec<String>> {
    let parse_error = |line: usize, message: &str| LastzError::ConfigParse {
        path: path.to_path_buf(),
        line,
        message: message.to_string(),
    };

    let mut current: Option<String> = None;
    let mut found = false;
    let mut keys = Vec::new();
    let mut defaults = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let lineno = idx + 1;
        let trimmed = raw.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        // Indented lines continue the previous value
        if raw.starts_with(char::is_whitespace) && current.is_some() {
            continue;
        }

        // Anything after the closing bracket is ignored
        if let Some(rest) = trimmed.strip_prefix('[') {
            let (name, _) = rest
                .split_once(']')
                .ok_or_else(|| parse_error(lineno, "unterminated section header"))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(parse_error(lineno, "empty section name"));
            }
            if name == section {
                found = true;
            }
            current = Some(name.to_string());
            continue;
        }

        let Some(current_section) = current.as_deref() else {
            return Err(parse_error(lineno, "key found before any section header"));
        };

        let key = match trimmed.find(['=', ':']) {
            Some(pos) => trimmed[..pos].trim_end(),
            None => trimmed,
        };
        if key.is_empty() {
            return Err(parse_error(lineno, "empty key"));
        }

        if current_section == section {
            keys.push(key.to_string());
        } else if current_section == DEFAULT_SECTION {
            defaults.push(key.to_string());
        }
    }

    if !found && section != DEFAULT_SECTION {
        return Err(LastzError::MissingSection {
            path: path.to_path_buf(),
            section: section.to_string(),
        });
    }

    if section != DEFAULT_SECTION {
        keys.extend(defaults);
    }

    let mut seen = HashSet::new();
    keys.retain(|k| seen.insert(k.clone()));
    Ok(keys)
}

/// The set of alignment file names to leave out of a copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BadFileRegistry {
    names: HashSet<String>,
}

impl BadFileRegistry {
    /// Build a registry from basenames; duplicates collapse.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Load the keys of `section` from the configuration file at `path`.
    pub fn load(path: &Path, section: &str) -> Result<Self> {
        Ok(Self::from_keys(read_section_keys(path, section)?))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &HashSet<String> {
        &self.names
    }
}

impl From<HashSet<String>> for BadFileRegistry {
    fn from(names: HashSet<String>) -> Self {
        Self { names }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(text: &str, section: &str) -> Result<Vec<String>> {
        parse_section_keys(text, section, Path::new("test.conf"))
    }

    #[test]
    fn test_key_forms() {
        let text = "\
[bad]
uce-1.nexus = too short
uce-2.nexus: duplicate
uce-3.nexus
[other]
uce-4.nexus
";
        assert_eq!(
            parse(text, "bad").unwrap(),
            vec!["uce-1.nexus", "uce-2.nexus", "uce-3.nexus"]
        );
        assert_eq!(parse(text, "other").unwrap(), vec!["uce-4.nexus"]);
    }

    #[test]
    fn test_case_preserved_and_duplicates_collapse() {
        let text = "[bad]\nUCE-1.Nexus\nuce-1.nexus\nUCE-1.Nexus = again\n";
        assert_eq!(parse(text, "bad").unwrap(), vec!["UCE-1.Nexus", "uce-1.nexus"]);
    }

    #[test]
    fn test_comments_and_continuations_ignored() {
        let text = "\
# leading comment
[bad]
; another comment
a.fa = first line
  continues here
b.fa
";
        assert_eq!(parse(text, "bad").unwrap(), vec!["a.fa", "b.fa"]);
    }

    #[test]
    fn test_section_split_across_file() {
        let text = "[bad]\na.fa\n[other]\nx.fa\n[bad]\nb.fa\n";
        assert_eq!(parse(text, "bad").unwrap(), vec!["a.fa", "b.fa"]);
    }

    #[test]
    fn test_default_keys_appended() {
        let text = "[DEFAULT]\nshared.fa\na.fa\n[bad]\na.fa\nb.fa\n";
        assert_eq!(parse(text, "bad").unwrap(), vec!["a.fa", "b.fa", "shared.fa"]);
    }

    #[test]
    fn test_empty_section() {
        assert!(parse("[bad]\n[other]\nx.fa\n", "bad").unwrap().is_empty());
    }

    #[test]
    fn test_missing_section() {
        let err = parse("[other]\nx.fa\n", "bad").unwrap_err();
        assert!(matches!(err, LastzError::MissingSection { section, .. } if section == "bad"));
    }

    #[test]
    fn test_key_before_header() {
        let err = parse("stray.fa\n[bad]\n", "bad").unwrap_err();
        assert!(matches!(err, LastzError::ConfigParse { line: 1, .. }));
    }

    #[test]
    fn test_unterminated_header() {
        let err = parse("[bad\na.fa\n", "bad").unwrap_err();
        assert!(matches!(err, LastzError::ConfigParse { line: 1, .. }));
    }

    #[test]
    fn test_text_after_header_ignored() {
        let text = "[bad] ; flagged by review\na.fa\n[other]# note\nb.fa\n";
        assert_eq!(parse(text, "bad").unwrap(), vec!["a.fa"]);
        assert_eq!(parse(text, "other").unwrap(), vec!["b.fa"]);
    }

    #[test]
    fn test_empty_header() {
        let err = parse("[]\na.fa\n", "bad").unwrap_err();
        assert!(matches!(err, LastzError::ConfigParse { line: 1, .. }));
    }

    #[test]
    fn test_registry_load() {
        let dir = tempfile::tempdir().unwrap();
        let conf = dir.path().join("bad.conf");
        fs::write(&conf, "[bad]\na.fa\nb.fa\na.fa\n").unwrap();

        let registry = BadFileRegistry::load(&conf, "bad").unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("a.fa"));
        assert!(!registry.contains("c.fa"));
    }

    #[test]
    fn test_registry_missing_file() {
        let err = BadFileRegistry::load(Path::new("/nonexistent/bad.conf"), "bad").unwrap_err();
        assert!(matches!(err, LastzError::FileNotFound(_)));
    }
}
