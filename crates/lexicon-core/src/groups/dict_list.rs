//! Ordered dictionary list with the editing contract used by list views.
//!
//! A list view bound to a [`DictList`] translates user gestures (drag and
//! drop, delete key, in-place edit) into [`insert`](DictList::insert),
//! [`remove`](DictList::remove) and [`set_at`](DictList::set_at) calls and
//! re-renders from [`iter`](DictList::iter).  Nothing here knows about
//! widgets.
//!
//! A *source* list shows the whole catalog as a drag origin.  It can be read
//! and dragged from, but never changed.

use std::fmt;

use super::{resolve_single, EditError};
use crate::catalog::{Catalog, DictionaryRef};

#[derive(Clone, Default)]
pub struct DictList {
    items: Vec<DictionaryRef>,
    is_source: bool,
}

impl DictList {
    /// An editable list.
    pub fn new(items: Vec<DictionaryRef>) -> Self {
        Self {
            items,
            is_source: false,
        }
    }

    /// A read-only list holding every dictionary of `catalog`.
    pub fn source(catalog: &Catalog) -> Self {
        Self {
            items: catalog.iter().cloned().collect(),
            is_source: true,
        }
    }

    pub fn is_source(&self) -> bool {
        self.is_source
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&DictionaryRef> {
        self.items.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DictionaryRef> {
        self.items.iter()
    }

    /// Inserts `dictionary` before `position`; `position == len()` appends.
    ///
    /// # Errors
    ///
    /// - [`EditError::ImmutableSource`] on a source list.
    /// - [`EditError::IndexOutOfRange`] if `position > len()`.
    pub fn insert(&mut self, position: usize, dictionary: DictionaryRef) -> Result<(), EditError> {
        self.ensure_editable()?;
        if position > self.items.len() {
            return Err(EditError::IndexOutOfRange {
                index: position,
                len: self.items.len(),
            });
        }
        self.items.insert(position, dictionary);
        Ok(())
    }

    /// Removes `count` dictionaries starting at `position`.
    ///
    /// # Errors
    ///
    /// - [`EditError::ImmutableSource`] on a source list.
    /// - [`EditError::IndexOutOfRange`] if the range reaches past the end.
    pub fn remove(&mut self, position: usize, count: usize) -> Result<(), EditError> {
        self.ensure_editable()?;
        let end = position
            .checked_add(count)
            .filter(|&end| end <= self.items.len())
            .ok_or(EditError::IndexOutOfRange {
                index: position.saturating_add(count),
                len: self.items.len(),
            })?;
        self.items.drain(position..end);
        Ok(())
    }

    /// Replaces the dictionary at `position` with the catalog entry for `id`.
    ///
    /// # Errors
    ///
    /// - [`EditError::ImmutableSource`] on a source list.
    /// - [`EditError::IndexOutOfRange`] if `position >= len()`.
    /// - [`EditError::UnknownDictionary`] if `id` is not in `catalog`; the
    ///   current entry stays in place.
    pub fn set_at(&mut self, position: usize, id: &str, catalog: &Catalog) -> Result<(), EditError> {
        self.ensure_editable()?;
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(position)
            .ok_or(EditError::IndexOutOfRange { index: position, len })?;
        *slot = resolve_single(id, catalog).ok_or_else(|| EditError::UnknownDictionary(id.to_string()))?;
        Ok(())
    }

    fn ensure_editable(&self) -> Result<(), EditError> {
        if self.is_source {
            Err(EditError::ImmutableSource)
        } else {
            Ok(())
        }
    }
}

impl fmt::Debug for DictList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DictList")
            .field("ids", &self.items.iter().map(|d| d.id()).collect::<Vec<_>>())
            .field("is_source", &self.is_source)
            .finish()
    }
}
