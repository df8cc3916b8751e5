//! Shared utility for finding the lastz binary
//!
//! lastz is an external, pre-built program. This module locates it whether it
//! was installed next to our executables, pointed at explicitly, or is simply
//! on the system PATH.

use crate::error::{LastzError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable that may hold the path to the lastz binary.
pub const LASTZ_ENV: &str = "LASTZ";

/// Find the lastz binary.
///
/// Search order:
/// 1. Explicit path (command line or configuration)
/// 2. `$LASTZ`
/// 3. Same directory as current executable
/// 4. System PATH
pub fn find_lastz(explicit: Option<&Path>) -> Result<PathBuf> {
    find_binary("lastz", explicit, LASTZ_ENV, std::env::var_os(LASTZ_ENV))
}

/// Find a binary by name, honouring an explicit path and an environment override.
///
/// `env_value` is the current value of the variable named `env_var`.
pub fn find_binary(
    name: &str,
    explicit: Option<&Path>,
    env_var: &str,
    env_value: Option<OsString>,
) -> Result<PathBuf> {
    // 1. An explicit path must exist; falling through would hide a typo
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(LastzError::FileNotFound(path.to_path_buf()));
    }

    // 2. Environment override
    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        let path = PathBuf::from(value);
        if path.is_file() {
            log::debug!("Using {name} from ${env_var}: {}", path.display());
            return Ok(path);
        }
        log::warn!(
            "${env_var} points to {}, which does not exist; searching elsewhere for {name}",
            path.display()
        );
    }

    // 3. Same directory as the current executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let binary = exe_dir.join(name);
            if binary.is_file() {
                log::debug!("Using {name} next to executable: {}", binary.display());
                return Ok(binary);
            }
        }
    }

    // 4. Fall back to PATH
    if let Ok(path) = which::which(name) {
        log::debug!("Using {name} from PATH: {}", path.display());
        return Ok(path);
    }

    Err(LastzError::BinaryNotFound(name.to_string()))
}
