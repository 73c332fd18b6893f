//! Catalog provider backed by a TOML manifest.
//!
//! The settings tool has no dictionary loader of its own.  Instead it reads a
//! manifest listing the dictionaries a loader would have found, in load
//! order:
//!
//! ```toml
//! [[dictionary]]
//! id = "1f3c9a"
//! name = "English-Russian"
//!
//! [[dictionary]]
//! id = "77b0e2"
//! name = "Wikipedia"
//! ```

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::PathBuf;

use lexicon_core::{Catalog, CatalogEntry};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::application::ports::{CatalogError, CatalogProvider};

/// Error type for manifest loading.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("cannot read catalog manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid catalog manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(rename = "dictionary", default)]
    dictionaries: Vec<CatalogEntry>,
}

/// Reads the catalog from a manifest file each time it is asked.
#[derive(Debug, Clone)]
pub struct ManifestCatalog {
    path: PathBuf,
}

impl ManifestCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parses the manifest into a [`Catalog`].
    ///
    /// Duplicate identifiers are kept (lookups see the first one) and logged.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] if the file cannot be read or is not a valid
    /// manifest.
    pub fn load(&self) -> Result<Catalog, ManifestError> {
        let text = fs::read_to_string(&self.path).map_err(|source| ManifestError::Io {
            path: self.path.clone(),
            source,
        })?;
        let catalog = parse_manifest(&text).map_err(|source| ManifestError::Parse {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), dictionaries = catalog.len(), "catalog manifest loaded");
        Ok(catalog)
    }
}

impl CatalogProvider for ManifestCatalog {
    fn list_loaded_dictionaries(&self) -> Result<Catalog, CatalogError> {
        self.load().map_err(|e| CatalogError::Unavailable(e.to_string()))
    }
}

fn parse_manifest(text: &str) -> Result<Catalog, toml::de::Error> {
    let manifest: Manifest = toml::from_str(text)?;

    let mut seen = HashSet::new();
    for entry in &manifest.dictionaries {
        if !seen.insert(entry.id.as_str()) {
            warn!(id = %entry.id, "duplicate dictionary id in catalog manifest");
        }
    }

    Ok(Catalog::from_entries(manifest.dictionaries))
}
