//! The top-level sequence of groups (one tab per group in the settings UI).
//!
//! [`GroupList`] is generic so the same structural edits work on resolved
//! groups during an interactive session and directly on persisted groups when
//! no catalog is available (renaming or reordering must not require one).

use super::{resolve, unresolve, EditError, ResolvedGroup};
use crate::catalog::Catalog;
use crate::config::PersistedGroup;

/// Name and icon access shared by persisted and resolved groups.
pub trait GroupLabel {
    /// A new group with `name`, no icon and no dictionaries.
    fn named(name: String) -> Self;
    fn name(&self) -> &str;
    fn set_name(&mut self, name: String);
    fn icon(&self) -> &str;
    fn set_icon(&mut self, icon: String);
}

impl GroupLabel for PersistedGroup {
    fn named(name: String) -> Self {
        PersistedGroup::new(name)
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn set_name(&mut self, name: String) {
        self.name = name;
    }
    fn icon(&self) -> &str {
        &self.icon
    }
    fn set_icon(&mut self, icon: String) {
        self.icon = icon;
    }
}

impl GroupLabel for ResolvedGroup {
    fn named(name: String) -> Self {
        ResolvedGroup::new(name)
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn set_name(&mut self, name: String) {
        self.name = name;
    }
    fn icon(&self) -> &str {
        &self.icon
    }
    fn set_icon(&mut self, icon: String) {
        self.icon = icon;
    }
}

/// Ordered groups.  Every operation either succeeds or leaves the list as it was.
#[derive(Debug, Clone)]
pub struct GroupList<G> {
    groups: Vec<G>,
}

impl<G> Default for GroupList<G> {
    fn default() -> Self {
        Self { groups: Vec::new() }
    }
}

impl<G: GroupLabel> GroupList<G> {
    pub fn new(groups: Vec<G>) -> Self {
        Self { groups }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&G> {
        self.groups.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut G> {
        self.groups.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &G> {
        self.groups.iter()
    }

    /// Index of the first group called `name`.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.name() == name)
    }

    /// First group called `name`.
    pub fn find_by_name(&self, name: &str) -> Option<&G> {
        self.groups.iter().find(|g| g.name() == name)
    }

    /// Inserts a new empty group before `position`; `position == len()` appends.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::IndexOutOfRange`] if `position > len()`.
    pub fn add_group(&mut self, position: usize, name: impl Into<String>) -> Result<(), EditError> {
        if position > self.groups.len() {
            return Err(self.out_of_range(position));
        }
        self.groups.insert(position, G::named(name.into()));
        Ok(())
    }

    /// Removes and returns the group at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::IndexOutOfRange`] if there is no such group.
    pub fn remove_group(&mut self, index: usize) -> Result<G, EditError> {
        self.check(index)?;
        Ok(self.groups.remove(index))
    }

    /// Moves the group at `from` so that it ends up at index `to`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::IndexOutOfRange`] if either index is not a valid
    /// group index.
    pub fn move_group(&mut self, from: usize, to: usize) -> Result<(), EditError> {
        self.check(from)?;
        self.check(to)?;
        let group = self.groups.remove(from);
        self.groups.insert(to, group);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`EditError::IndexOutOfRange`] if there is no such group.
    pub fn rename_group(&mut self, index: usize, name: impl Into<String>) -> Result<(), EditError> {
        self.check(index)?;
        self.groups[index].set_name(name.into());
        Ok(())
    }

    /// Sets the icon file name; an empty string clears the icon.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::IndexOutOfRange`] if there is no such group.
    pub fn set_group_icon(&mut self, index: usize, icon: impl Into<String>) -> Result<(), EditError> {
        self.check(index)?;
        self.groups[index].set_icon(icon.into());
        Ok(())
    }

    pub fn into_vec(self) -> Vec<G> {
        self.groups
    }

    fn check(&self, index: usize) -> Result<(), EditError> {
        if index < self.groups.len() {
            Ok(())
        } else {
            Err(self.out_of_range(index))
        }
    }

    fn out_of_range(&self, index: usize) -> EditError {
        EditError::IndexOutOfRange {
            index,
            len: self.groups.len(),
        }
    }
}

impl GroupList<ResolvedGroup> {
    /// Resolves every persisted group against `catalog`, keeping group order.
    pub fn resolve_all(persisted: &[PersistedGroup], catalog: &Catalog) -> Self {
        Self::new(persisted.iter().map(|g| resolve(g, catalog)).collect())
    }

    /// Converts every group back to its persisted form.
    pub fn to_persisted(&self) -> Vec<PersistedGroup> {
        self.groups.iter().map(unresolve).collect()
    }
}

/// Label shown for an icon file name in an icon picker: the file stem with
/// its first letter capitalised, or `"None"` for no icon.
///
/// ```rust
/// use lexicon_core::groups::icon_display_name;
///
/// assert_eq!(icon_display_name("ru.png"), "Ru");
/// assert_eq!(icon_display_name(""), "None");
/// ```
pub fn icon_display_name(icon: &str) -> String {
    if icon.is_empty() {
        return "None".to_string();
    }
    let stem = icon.rsplit_once('.').map_or(icon, |(stem, _)| stem);
    let mut chars = stem.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
