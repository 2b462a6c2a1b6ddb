//! Path resolution for gtask configuration and data files.
//!
//! All gtask data is stored in `$GT_HOME`, or `~/.gt/` when unset:
//! - `config.yaml` - Main configuration file
//! - `gt.db` - SQLite database holding tasks, notes and tags
//! - `gt.log` - Log output

use std::path::PathBuf;

use crate::error::Error;

/// Environment variable overriding the data root.
pub const HOME_ENV: &str = "GT_HOME";

/// Paths to gtask configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.gt/`
    pub root: PathBuf,
    /// Config file: `~/.gt/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.gt/gt.db`
    pub database: PathBuf,
    /// Log file: `~/.gt/gt.log`
    pub log_file: PathBuf,
}

impl Paths {
    /// Resolve paths from `$GT_HOME`, falling back to `~/.gt`.
    ///
    /// # Errors
    ///
    /// Returns an error if neither `$GT_HOME` nor the home directory is set.
    pub fn new() -> Result<Self, Error> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var_os("HOME")
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;
        Ok(Self::with_root(PathBuf::from(home).join(".gt")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("gt.db"),
            log_file: root.join("gt.log"),
            root,
        }
    }

    /// Ensure the root directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), Error> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                Error::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }
        Ok(())
    }
}
