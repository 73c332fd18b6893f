//! XML-based configuration persistence.
//!
//! Reads and writes [`Configuration`] to the `config` file under the per-user
//! [`ConfigRoot`]:
//! - Windows:      `<home>\Application Data\Lexicon\config`
//! - other systems: `<home>/.lexicon/config`
//!
//! The same root also holds the `index` directory used by dictionary indexers
//! and two optional stylesheets (`style.css` for articles, `qt-style.css` for
//! the application chrome).
//!
//! # First run
//!
//! When no configuration file exists, [`ConfigStore::load`] builds the
//! default configuration, writes it straight away so the file exists on the
//! next run, and returns it.  Any other failure is reported to the caller;
//! in particular a malformed file is never overwritten with defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use lexicon_core::{parse_document, render_document, Configuration, DocumentError, RenderError};
use thiserror::Error;
use tracing::{debug, info};

use super::home::ConfigRoot;

/// File name of the configuration document inside the root.
pub const CONFIG_FILE_NAME: &str = "config";
/// Directory for dictionary indexes inside the root.
pub const INDEX_DIR_NAME: &str = "index";
/// Optional user stylesheet for rendered articles.
pub const USER_STYLESHEET_NAME: &str = "style.css";
/// Optional user stylesheet for the application widgets.
pub const USER_QT_STYLESHEET_NAME: &str = "qt-style.css";

/// Well-known system dictionary directory probed on first run.
#[cfg(target_os = "linux")]
pub const SYSTEM_DICTIONARY_PATH: Option<&str> = Some("/usr/share/stardict/dic");
#[cfg(not(target_os = "linux"))]
pub const SYSTEM_DICTIONARY_PATH: Option<&str> = None;

/// Error type for configuration storage operations.
#[derive(Debug, Error)]
pub enum ConfigStoreError {
    /// The user's home directory could not be determined.
    #[error("could not determine home directory")]
    NoHomeDirectory,

    /// The storage root (or a directory inside it) could not be created.
    #[error("cannot use configuration directory {path}: {source}")]
    MissingHomeDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file exists but could not be read.
    #[error("cannot read configuration file {path}: {source}")]
    UnreadableConfigFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file could not be written.
    #[error("cannot write configuration file {path}: {source}")]
    UnwritableConfigFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file is not a well-formed document.
    #[error("malformed configuration file {path} at line {line}, column {column}: {message}")]
    MalformedConfigFile {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// The configuration could not be rendered as a document.
    #[error("cannot render configuration for {path}: {source}")]
    UnrenderableConfiguration {
        path: PathBuf,
        #[source]
        source: RenderError,
    },
}

impl ConfigStoreError {
    fn malformed(path: &Path, err: DocumentError) -> Self {
        ConfigStoreError::MalformedConfigFile {
            path: path.to_path_buf(),
            line: err.line,
            column: err.column,
            message: err.message,
        }
    }
}

/// Loads and saves the configuration under one [`ConfigRoot`].
#[derive(Debug, Clone)]
pub struct ConfigStore {
    root: ConfigRoot,
}

impl ConfigStore {
    pub fn new(root: ConfigRoot) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &ConfigRoot {
        &self.root
    }

    /// Full path of the configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigStoreError::MissingHomeDirectory`] if the root cannot
    /// be created.
    pub fn config_file_path(&self) -> Result<PathBuf, ConfigStoreError> {
        self.root.file(CONFIG_FILE_NAME)
    }

    /// Loads the configuration, bootstrapping a default one on first run.
    ///
    /// # Errors
    ///
    /// - [`ConfigStoreError::MissingHomeDirectory`] if the root cannot be created.
    /// - [`ConfigStoreError::UnreadableConfigFile`] for read failures other than
    ///   "not found".
    /// - [`ConfigStoreError::MalformedConfigFile`] if the document does not parse.
    /// - [`ConfigStoreError::UnwritableConfigFile`] if the first-run default
    ///   cannot be written.
    pub fn load(&self) -> Result<Configuration, ConfigStoreError> {
        let path = self.config_file_path()?;

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let config = default_configuration();
                info!(path = %path.display(), "no configuration file; writing defaults");
                self.save(&config)?;
                return Ok(config);
            }
            Err(source) => return Err(ConfigStoreError::UnreadableConfigFile { path, source }),
        };

        let text = decode_utf8(&bytes).map_err(|e| ConfigStoreError::malformed(&path, e))?;
        let config = parse_document(text).map_err(|e| ConfigStoreError::malformed(&path, e))?;

        debug!(
            path = %path.display(),
            paths = config.paths.len(),
            groups = config.groups.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Writes `config` to the configuration file, replacing its contents.
    ///
    /// # Errors
    ///
    /// - [`ConfigStoreError::MissingHomeDirectory`] if the root cannot be created.
    /// - [`ConfigStoreError::UnrenderableConfiguration`] if rendering fails.
    /// - [`ConfigStoreError::UnwritableConfigFile`] if the file cannot be written.
    pub fn save(&self, config: &Configuration) -> Result<(), ConfigStoreError> {
        let path = self.config_file_path()?;
        let text = render_document(config).map_err(|source| ConfigStoreError::UnrenderableConfiguration {
            path: path.clone(),
            source,
        })?;

        fs::write(&path, text).map_err(|source| ConfigStoreError::UnwritableConfigFile {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// The `index` directory, created on demand.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigStoreError::MissingHomeDirectory`] if either the root or
    /// the index directory cannot be created.
    pub fn index_dir(&self) -> Result<PathBuf, ConfigStoreError> {
        self.root.subdir(INDEX_DIR_NAME)
    }

    /// Path of the user article stylesheet.  The file may not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigStoreError::MissingHomeDirectory`] if the root cannot
    /// be created.
    pub fn user_stylesheet_path(&self) -> Result<PathBuf, ConfigStoreError> {
        self.root.file(USER_STYLESHEET_NAME)
    }

    /// Path of the user application stylesheet.  The file may not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigStoreError::MissingHomeDirectory`] if the root cannot
    /// be created.
    pub fn user_qt_stylesheet_path(&self) -> Result<PathBuf, ConfigStoreError> {
        self.root.file(USER_QT_STYLESHEET_NAME)
    }

    /// Contents of the user application stylesheet, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigStoreError::MissingHomeDirectory`] if the root cannot be
    /// created, or [`ConfigStoreError::UnreadableConfigFile`] if the file exists
    /// but cannot be read.
    pub fn read_user_qt_stylesheet(&self) -> Result<Option<String>, ConfigStoreError> {
        let path = self.user_qt_stylesheet_path()?;
        match fs::read_to_string(&path) {
            Ok(css) => Ok(Some(css)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ConfigStoreError::UnreadableConfigFile { path, source }),
        }
    }
}

/// The configuration written on first run: the system dictionary directory
/// if this platform has one and it exists, nothing else.
pub fn default_configuration() -> Configuration {
    let mut config = Configuration::default();

    if let Some(probe) = SYSTEM_DICTIONARY_PATH {
        if Path::new(probe).is_dir() {
            config.paths.push(probe.to_string());
        }
    }

    config
}

fn decode_utf8(bytes: &[u8]) -> Result<&str, DocumentError> {
    std::str::from_utf8(bytes).map_err(|e| {
        let valid = &bytes[..e.valid_up_to()];
        // The prefix is valid by construction.
        let prefix = std::str::from_utf8(valid).unwrap_or_default();
        DocumentError::at(prefix, prefix.len(), "invalid UTF-8")
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
