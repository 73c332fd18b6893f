//! EditingSession: resolved groups plus the configuration they came from.
//!
//! A session is opened from a loaded [`Configuration`] and a catalog snapshot.
//! Every persisted group is resolved once on open; all membership edits then
//! happen on the resolved groups.  [`EditingSession::commit`] turns the
//! resolved groups back into identifier lists, producing the configuration to
//! save.
//!
//! # Dropped dictionaries
//!
//! Identifiers that did not resolve are not carried through a session: a
//! group that named a dictionary which has since disappeared loses that entry
//! on the next save.  The session logs a warning when it opens so the loss is
//! visible.

use lexicon_core::{
    resolve_single, Catalog, Configuration, DictList, DictionaryRef, EditError, GroupList, ResolvedGroup,
};
use thiserror::Error;
use tracing::warn;

use super::ports::{CatalogError, CatalogProvider};

/// Error type for session operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// No group has the given index.
    #[error("no group at index {0}")]
    UnknownGroup(usize),

    /// The underlying list edit was rejected.
    #[error(transparent)]
    Edit(#[from] EditError),
}

/// The two UI contexts that remember a selected group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupContext {
    /// The main window.
    Main,
    /// The scan popup.
    Popup,
}

/// An in-memory editing session over one configuration.
pub struct EditingSession {
    config: Configuration,
    catalog: Catalog,
    groups: GroupList<ResolvedGroup>,
}

impl EditingSession {
    /// Resolves every group of `config` against `catalog`.
    pub fn new(config: Configuration, catalog: Catalog) -> Self {
        let groups = GroupList::resolve_all(&config.groups, &catalog);

        for (persisted, resolved) in config.groups.iter().zip(groups.iter()) {
            let dropped = persisted.dictionary_ids.len().saturating_sub(resolved.dictionaries.len());
            if dropped > 0 {
                warn!(
                    group = %persisted.name,
                    dropped,
                    "dictionaries not in the catalog will be dropped from the group on save"
                );
            }
        }

        Self {
            config,
            catalog,
            groups,
        }
    }

    /// Asks `provider` for the catalog, then behaves like [`new`](Self::new).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the provider fails.
    pub fn open(config: Configuration, provider: &dyn CatalogProvider) -> Result<Self, CatalogError> {
        let catalog = provider.list_loaded_dictionaries()?;
        Ok(Self::new(config, catalog))
    }

    pub fn groups(&self) -> &GroupList<ResolvedGroup> {
        &self.groups
    }

    /// Structural edits on the group list (add, remove, move, rename, icon).
    pub fn groups_mut(&mut self) -> &mut GroupList<ResolvedGroup> {
        &mut self.groups
    }

    /// Read-only list of every catalog dictionary, for use as a drag origin.
    pub fn source_list(&self) -> DictList {
        DictList::source(&self.catalog)
    }

    /// Inserts dictionary `id` into group `group` at `position`, or at the
    /// end when `position` is `None`.
    ///
    /// # Errors
    ///
    /// - [`SessionError::UnknownGroup`] if there is no such group.
    /// - [`EditError::UnknownDictionary`] if `id` is not in the catalog.
    /// - [`EditError::IndexOutOfRange`] if `position` is past the end.
    pub fn add_dictionary(&mut self, group: usize, position: Option<usize>, id: &str) -> Result<(), SessionError> {
        let catalog = &self.catalog;
        let list = &mut self
            .groups
            .get_mut(group)
            .ok_or(SessionError::UnknownGroup(group))?
            .dictionaries;
        let dictionary = resolve_single(id, catalog).ok_or_else(|| EditError::UnknownDictionary(id.to_string()))?;
        let position = position.unwrap_or(list.len());
        list.insert(position, dictionary)?;
        Ok(())
    }

    /// Removes `count` dictionaries from group `group` starting at `position`.
    ///
    /// # Errors
    ///
    /// - [`SessionError::UnknownGroup`] if there is no such group.
    /// - [`EditError::IndexOutOfRange`] if the range reaches past the end.
    pub fn remove_dictionaries(&mut self, group: usize, position: usize, count: usize) -> Result<(), SessionError> {
        self.group_mut(group)?.dictionaries.remove(position, count)?;
        Ok(())
    }

    /// Replaces the dictionary at `position` of group `group` with `id`.
    ///
    /// # Errors
    ///
    /// - [`SessionError::UnknownGroup`] if there is no such group.
    /// - [`EditError::UnknownDictionary`] if `id` is not in the catalog.
    /// - [`EditError::IndexOutOfRange`] if `position` is past the end.
    pub fn set_dictionary(&mut self, group: usize, position: usize, id: &str) -> Result<(), SessionError> {
        let catalog = &self.catalog;
        let resolved = self
            .groups
            .get_mut(group)
            .ok_or(SessionError::UnknownGroup(group))?;
        resolved.dictionaries.set_at(position, id, catalog)?;
        Ok(())
    }

    /// Dictionaries to search in `context`: those of the group last selected
    /// there, or the whole catalog if no group is selected or the selected
    /// group no longer exists.
    pub fn active_dictionaries(&self, context: GroupContext) -> Vec<DictionaryRef> {
        let selected = match context {
            GroupContext::Main => &self.config.last_main_group,
            GroupContext::Popup => &self.config.last_popup_group,
        };

        if !selected.is_empty() {
            if let Some(group) = self.groups.find_by_name(selected) {
                return group.dictionaries.iter().cloned().collect();
            }
        }

        self.catalog.iter().cloned().collect()
    }

    /// The configuration with the session's groups written back.
    pub fn commit(&self) -> Configuration {
        Configuration {
            groups: self.groups.to_persisted(),
            ..self.config.clone()
        }
    }

    fn group_mut(&mut self, index: usize) -> Result<&mut ResolvedGroup, SessionError> {
        self.groups.get_mut(index).ok_or(SessionError::UnknownGroup(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockCatalogProvider;
    use lexicon_core::{CatalogEntry, PersistedGroup};

    fn catalog() -> Catalog {
        Catalog::from_entries([
            CatalogEntry::new("en-ru", "English-Russian"),
            CatalogEntry::new("en-de", "English-German"),
            CatalogEntry::new("wiki", "Wikipedia"),
        ])
    }

    fn config() -> Configuration {
        let mut work = PersistedGroup::new("Work");
        work.dictionary_ids = vec!["en-de".into(), "retired".into(), "en-ru".into()];
        let mut misc = PersistedGroup::new("Misc");
        misc.icon = "jp.png".into();
        misc.dictionary_ids = vec!["wiki".into()];
        Configuration {
            paths: vec!["/dicts".into()],
            groups: vec![work, misc],
            last_popup_group: "Misc".into(),
            ..Configuration::default()
        }
    }

    fn ids(session: &EditingSession, group: usize) -> Vec<String> {
        session.groups().get(group).unwrap().dictionary_ids()
    }

    #[test]
    fn test_open_resolves_groups_with_provider_catalog() {
        // Arrange
        let mut provider = MockCatalogProvider::new();
        provider
            .expect_list_loaded_dictionaries()
            .times(1)
            .returning(|| Ok(catalog()));

        // Act
        let session = EditingSession::open(config(), &provider).expect("open must succeed");

        // Assert
        assert_eq!(ids(&session, 0), ["en-de", "en-ru"]);
        assert_eq!(ids(&session, 1), ["wiki"]);
    }

    #[test]
    fn test_open_propagates_provider_failure() {
        let mut provider = MockCatalogProvider::new();
        provider
            .expect_list_loaded_dictionaries()
            .returning(|| Err(CatalogError::Unavailable("scan failed".into())));

        let result = EditingSession::open(config(), &provider);

        assert_eq!(
            result.err(),
            Some(CatalogError::Unavailable("scan failed".into()))
        );
    }

    #[test]
    fn test_commit_drops_unresolved_ids_only() {
        let session = EditingSession::new(config(), catalog());

        let committed = session.commit();

        assert_eq!(committed.groups[0].dictionary_ids, ["en-de", "en-ru"]);
        assert_eq!(committed.groups[1], config().groups[1]);
        assert_eq!(committed.paths, config().paths);
        assert_eq!(committed.last_popup_group, "Misc");
    }

    #[test]
    fn test_add_dictionary_appends_by_default() {
        let mut session = EditingSession::new(config(), catalog());

        session.add_dictionary(1, None, "en-ru").unwrap();
        session.add_dictionary(1, Some(0), "en-de").unwrap();

        assert_eq!(ids(&session, 1), ["en-de", "wiki", "en-ru"]);
    }

    #[test]
    fn test_add_unknown_dictionary_is_rejected() {
        let mut session = EditingSession::new(config(), catalog());

        let err = session.add_dictionary(0, None, "retired").unwrap_err();

        assert_eq!(err, SessionError::Edit(EditError::UnknownDictionary("retired".into())));
        assert_eq!(ids(&session, 0), ["en-de", "en-ru"]);
    }

    #[test]
    fn test_edits_on_missing_group_fail() {
        let mut session = EditingSession::new(config(), catalog());

        assert_eq!(session.add_dictionary(7, None, "wiki"), Err(SessionError::UnknownGroup(7)));
        assert_eq!(session.remove_dictionaries(7, 0, 1), Err(SessionError::UnknownGroup(7)));
        assert_eq!(session.set_dictionary(7, 0, "wiki"), Err(SessionError::UnknownGroup(7)));
    }

    #[test]
    fn test_add_to_missing_group_reports_group_before_dictionary() {
        let mut session = EditingSession::new(config(), catalog());

        let result = session.add_dictionary(9, None, "zz");

        assert_eq!(result, Err(SessionError::UnknownGroup(9)));
    }

    #[test]
    fn test_set_and_remove_dictionaries() {
        let mut session = EditingSession::new(config(), catalog());

        session.set_dictionary(0, 1, "wiki").unwrap();
        assert_eq!(ids(&session, 0), ["en-de", "wiki"]);

        session.remove_dictionaries(0, 0, 1).unwrap();
        assert_eq!(ids(&session, 0), ["wiki"]);
    }

    #[test]
    fn test_source_list_is_whole_catalog_and_read_only() {
        let session = EditingSession::new(config(), catalog());

        let source = session.source_list();

        assert!(source.is_source());
        assert_eq!(source.len(), 3);
    }

    #[test]
    fn test_active_dictionaries_uses_selected_group() {
        let session = EditingSession::new(config(), catalog());

        let active = session.active_dictionaries(GroupContext::Popup);

        let active_ids: Vec<_> = active.iter().map(|d| d.id()).collect();
        assert_eq!(active_ids, ["wiki"]);
    }

    #[test]
    fn test_active_dictionaries_falls_back_to_catalog() {
        // Arrange: main context has no selection, popup names a missing group.
        let mut cfg = config();
        cfg.last_popup_group = "Deleted".into();
        let session = EditingSession::new(cfg, catalog());

        // Act
        let main = session.active_dictionaries(GroupContext::Main);
        let popup = session.active_dictionaries(GroupContext::Popup);

        // Assert
        assert_eq!(main.len(), 3);
        assert_eq!(popup.len(), 3);
    }

    #[test]
    fn test_group_structure_edits_survive_commit() {
        let mut session = EditingSession::new(config(), catalog());

        session.groups_mut().add_group(2, "New").unwrap();
        session.groups_mut().move_group(2, 0).unwrap();
        session.groups_mut().set_group_icon(0, "fr.png").unwrap();

        let committed = session.commit();
        let names: Vec<_> = committed.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["New", "Work", "Misc"]);
        assert_eq!(committed.groups[0].icon, "fr.png");
        assert_eq!(session.groups().position_of("Misc"), Some(2));
    }
}
