//! Dictionary groups: resolution and editing.
//!
//! A [`PersistedGroup`] names its dictionaries by identifier.  At runtime those
//! identifiers are resolved against the current [`Catalog`] into a
//! [`ResolvedGroup`] that holds live [`DictionaryRef`]s.  Identifiers whose
//! dictionary is gone (deleted from disk, path removed from the scan list) are
//! dropped silently: a missing dictionary must never stop the configuration
//! from loading.
//!
//! ```text
//!   PersistedGroup { ids: [a, b, c] }
//!          │ resolve(catalog = {a, c})
//!          ▼
//!   ResolvedGroup  { dictionaries: [a, c] }      ← edited via DictList
//!          │ unresolve
//!          ▼
//!   PersistedGroup { ids: [a, c] }
//! ```
//!
//! Order is the user's lookup priority inside the group and is preserved in
//! both directions.

pub mod dict_list;
pub mod group_list;

use thiserror::Error;
use tracing::debug;

use crate::catalog::{Catalog, DictionaryRef};
use crate::config::PersistedGroup;

pub use dict_list::DictList;
pub use group_list::{icon_display_name, GroupLabel, GroupList};

/// Errors reported by group editing operations.
///
/// Every operation that returns one of these has left its target unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EditError {
    /// The list is a read-only view of the whole catalog.
    #[error("the source list cannot be edited")]
    ImmutableSource,

    /// No dictionary in the catalog has this identifier.
    #[error("unknown dictionary: {0}")]
    UnknownDictionary(String),

    /// A position or count reaches past the end of the sequence.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// A group whose dictionaries have been looked up in the catalog.
#[derive(Debug, Clone, Default)]
pub struct ResolvedGroup {
    pub name: String,
    pub icon: String,
    pub dictionaries: DictList,
}

impl ResolvedGroup {
    /// An empty, editable group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: String::new(),
            dictionaries: DictList::default(),
        }
    }

    /// Identifiers of the member dictionaries, in order.
    pub fn dictionary_ids(&self) -> Vec<String> {
        self.dictionaries.iter().map(|d| d.id().to_string()).collect()
    }
}

/// Resolves every identifier of `persisted` against `catalog`.
///
/// Unknown identifiers are omitted; the rest keep their relative order.  Each
/// identifier yields at most one dictionary (the first catalog match).
///
/// # Examples
///
/// ```rust
/// use lexicon_core::catalog::{Catalog, CatalogEntry};
/// use lexicon_core::config::PersistedGroup;
/// use lexicon_core::groups::resolve;
///
/// let catalog = Catalog::from_entries([
///     CatalogEntry::new("a", "Alpha"),
///     CatalogEntry::new("c", "Gamma"),
/// ]);
/// let mut group = PersistedGroup::new("Mine");
/// group.dictionary_ids = vec!["a".into(), "b".into(), "c".into()];
///
/// let resolved = resolve(&group, &catalog);
/// assert_eq!(resolved.dictionary_ids(), ["a", "c"]);
/// ```
pub fn resolve(persisted: &PersistedGroup, catalog: &Catalog) -> ResolvedGroup {
    let mut dictionaries = Vec::with_capacity(persisted.dictionary_ids.len());

    for id in &persisted.dictionary_ids {
        match resolve_single(id, catalog) {
            Some(dictionary) => dictionaries.push(dictionary),
            None => debug!(group = %persisted.name, %id, "dictionary not in catalog; omitted"),
        }
    }

    ResolvedGroup {
        name: persisted.name.clone(),
        icon: persisted.icon.clone(),
        dictionaries: DictList::new(dictionaries),
    }
}

/// Converts a resolved group back to its persisted form.
///
/// Inverse of [`resolve`] whenever every identifier resolved.
pub fn unresolve(resolved: &ResolvedGroup) -> PersistedGroup {
    PersistedGroup {
        name: resolved.name.clone(),
        icon: resolved.icon.clone(),
        dictionary_ids: resolved.dictionary_ids(),
    }
}

/// Looks up one identifier; first match in catalog order.
pub fn resolve_single(id: &str, catalog: &Catalog) -> Option<DictionaryRef> {
    catalog.find(id).cloned()
}
