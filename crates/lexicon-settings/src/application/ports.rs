//! Abstractions the application layer needs from the outside world.

use lexicon_core::Catalog;
use thiserror::Error;

/// Error type for catalog providers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("dictionary catalog unavailable: {0}")]
    Unavailable(String),
}

/// Source of the currently loaded dictionaries.
///
/// The real implementation is a dictionary loader scanning
/// `Configuration::paths`; the settings tool reads a manifest file instead.
#[cfg_attr(test, mockall::automock)]
pub trait CatalogProvider: Send + Sync {
    /// Returns the loaded dictionaries in load order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the dictionaries cannot be enumerated.
    fn list_loaded_dictionaries(&self) -> Result<Catalog, CatalogError>;
}
