//! The runtime dictionary catalog.
//!
//! The catalog is the ordered set of dictionaries that a dictionary-loading
//! subsystem found while scanning the configured paths.  It is rebuilt from
//! scratch on every run, so nothing in here is ever persisted: groups refer to
//! dictionaries by their stable string identifier and are resolved against
//! whatever catalog snapshot is current (see [`crate::groups`]).
//!
//! # Why a trait? (for beginners)
//!
//! Real dictionaries are heavyweight objects (open files, indexes, format
//! specific readers) owned by a loader this crate knows nothing about.  The
//! [`Dictionary`] trait is the only thing the configuration core needs from
//! them: an identifier and a display name.  Loaders hand out
//! [`DictionaryRef`]s (`Arc<dyn Dictionary>`) so a resolved group can point at
//! the live object without copying it.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A loaded dictionary as seen by the configuration core.
pub trait Dictionary: Send + Sync {
    /// Stable identifier, unchanged across application runs.
    fn id(&self) -> &str;

    /// Human-readable name shown in group lists.
    fn name(&self) -> &str;
}

/// Shared handle to a loaded dictionary.
pub type DictionaryRef = Arc<dyn Dictionary>;

/// Plain `{id, name}` record for catalogs that do not carry a real dictionary
/// object (manifests, tests, benchmarks).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
}

impl CatalogEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Wraps the entry in a [`DictionaryRef`].
    pub fn into_ref(self) -> DictionaryRef {
        Arc::new(self)
    }
}

impl Dictionary for CatalogEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Immutable snapshot of the loaded dictionaries, in load order.
///
/// Identifiers are expected to be unique but this is not enforced: lookups
/// always return the first entry in scan order.
#[derive(Clone, Default)]
pub struct Catalog {
    entries: Vec<DictionaryRef>,
}

impl Catalog {
    pub fn new(entries: Vec<DictionaryRef>) -> Self {
        Self { entries }
    }

    /// Builds a catalog of plain [`CatalogEntry`] records.
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        Self::new(entries.into_iter().map(CatalogEntry::into_ref).collect())
    }

    /// Returns the first dictionary whose identifier equals `id`.
    pub fn find(&self, id: &str) -> Option<&DictionaryRef> {
        self.entries.iter().find(|d| d.id() == id)
    }

    /// Iterates over the dictionaries in scan order.
    pub fn iter(&self) -> impl Iterator<Item = &DictionaryRef> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|d| d.id()))
            .finish()
    }
}
