//! The per-user storage root.
//!
//! Everything Lexicon keeps on disk for a user lives under one directory:
//! - Windows:      `<home>\Application Data\Lexicon`
//! - other systems: `<home>/.lexicon`
//!
//! A [`ConfigRoot`] is resolved once at startup and handed to the
//! [`ConfigStore`](super::config::ConfigStore).  The directory itself is only
//! created when something is first read from or written to it.

use std::fs;
use std::path::{Path, PathBuf};

use super::config::ConfigStoreError;

/// Directory name under the user's home directory.
#[cfg(target_os = "windows")]
pub const ROOT_DIR_IN_HOME: &str = "Application Data/Lexicon";
#[cfg(not(target_os = "windows"))]
pub const ROOT_DIR_IN_HOME: &str = ".lexicon";

/// Handle to the per-user storage directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigRoot {
    path: PathBuf,
}

impl ConfigRoot {
    /// Uses `path` as the storage root (tests, `--config-dir`).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The platform default root under the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigStoreError::NoHomeDirectory`] when the home directory
    /// cannot be determined.
    pub fn from_home() -> Result<Self, ConfigStoreError> {
        let home = dirs::home_dir().ok_or(ConfigStoreError::NoHomeDirectory)?;
        Ok(Self::new(home.join(ROOT_DIR_IN_HOME)))
    }

    /// The root path, whether or not it exists yet.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the root if needed and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigStoreError::MissingHomeDirectory`] if the directory
    /// cannot be created, or exists but is not a directory.
    pub fn materialize(&self) -> Result<&Path, ConfigStoreError> {
        ensure_dir(&self.path)?;
        Ok(&self.path)
    }

    /// Creates `<root>/<name>` if needed and returns it.
    ///
    /// # Errors
    ///
    /// Same as [`materialize`](Self::materialize), for either directory.
    pub fn subdir(&self, name: &str) -> Result<PathBuf, ConfigStoreError> {
        let dir = self.materialize()?.join(name);
        ensure_dir(&dir)?;
        Ok(dir)
    }

    /// `<root>/<name>`, creating only the root.
    ///
    /// # Errors
    ///
    /// Same as [`materialize`](Self::materialize).
    pub fn file(&self, name: &str) -> Result<PathBuf, ConfigStoreError> {
        Ok(self.materialize()?.join(name))
    }
}

fn ensure_dir(dir: &Path) -> Result<(), ConfigStoreError> {
    fs::create_dir_all(dir).map_err(|source| ConfigStoreError::MissingHomeDirectory {
        path: dir.to_path_buf(),
        source,
    })
}
