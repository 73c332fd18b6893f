//! Integration tests for configuration storage and group editing.
//!
//! These tests drive the settings library end to end against a real
//! temporary directory: `ConfigStore` + `ManifestCatalog` + `EditingSession`.

use std::path::PathBuf;

use lexicon_core::{Configuration, PersistedGroup};
use lexicon_settings::application::manage_paths::add_path;
use lexicon_settings::application::session::{EditingSession, GroupContext, SessionError};
use lexicon_settings::infrastructure::catalog::ManifestCatalog;
use lexicon_settings::infrastructure::storage::config::CONFIG_FILE_NAME;
use lexicon_settings::infrastructure::storage::{ConfigRoot, ConfigStore, ConfigStoreError};
use uuid::Uuid;

struct TempRoot(PathBuf);

impl TempRoot {
    fn new() -> Self {
        Self(std::env::temp_dir().join(format!("lexicon_it_{}", Uuid::new_v4())))
    }

    fn store(&self) -> ConfigStore {
        ConfigStore::new(ConfigRoot::new(&self.0))
    }

    fn manifest(&self, body: &str) -> ManifestCatalog {
        std::fs::create_dir_all(&self.0).unwrap();
        let path = self.0.join("catalog.toml");
        std::fs::write(&path, body).unwrap();
        ManifestCatalog::new(path)
    }
}

impl Drop for TempRoot {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.0).ok();
    }
}

const MANIFEST: &str = r#"
[[dictionary]]
id = "en-ru"
name = "English-Russian"

[[dictionary]]
id = "wiki"
name = "Wikipedia"
"#;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn test_first_load_writes_a_file_that_loads_back_identically() {
    let tmp = TempRoot::new();
    let store = tmp.store();

    let first = store.load().expect("first run must bootstrap");
    let second = store.load().expect("bootstrapped file must load");

    assert!(tmp.0.join(CONFIG_FILE_NAME).is_file());
    assert_eq!(first, second);
}

#[test]
fn test_saved_configuration_round_trips_through_disk() {
    // Arrange
    let tmp = TempRoot::new();
    let store = tmp.store();
    let mut config = Configuration::default();
    add_path(&mut config, "/srv/dicts & more");
    let mut group = PersistedGroup::new("Ünïcode <group>");
    group.icon = "ru.png".into();
    group.dictionary_ids = vec!["x\"y".into()];
    config.groups.push(group);
    config.preferences.enable_scan_popup = true;
    config.preferences.scan_popup_modifiers.0 = 6;
    config.last_main_group = "Ünïcode <group>".into();

    // Act
    store.save(&config).unwrap();
    let loaded = store.load().unwrap();

    // Assert
    assert_eq!(loaded, config);
}

#[test]
fn test_malformed_file_is_reported_and_left_untouched() {
    let tmp = TempRoot::new();
    std::fs::create_dir_all(&tmp.0).unwrap();
    let path = tmp.0.join(CONFIG_FILE_NAME);
    std::fs::write(&path, "<config>\n<paths>\n").unwrap();

    let result = tmp.store().load();

    assert!(matches!(result, Err(ConfigStoreError::MalformedConfigFile { .. })));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "<config>\n<paths>\n");
}

#[test]
fn test_session_edit_and_save_cycle() {
    // Arrange: a stored group naming one loaded and one missing dictionary.
    let tmp = TempRoot::new();
    let store = tmp.store();
    let catalog = tmp.manifest(MANIFEST);
    let mut config = store.load().unwrap();
    let mut group = PersistedGroup::new("Everyday");
    group.dictionary_ids = vec!["gone".into(), "en-ru".into()];
    config.groups.push(group);
    config.last_popup_group = "Everyday".into();
    store.save(&config).unwrap();

    // Act
    let mut session = EditingSession::open(store.load().unwrap(), &catalog).unwrap();
    session.add_dictionary(0, None, "wiki").unwrap();
    store.save(&session.commit()).unwrap();

    // Assert
    let reloaded = store.load().unwrap();
    assert_eq!(reloaded.groups[0].dictionary_ids, ["en-ru", "wiki"]);
    let reopened = EditingSession::open(reloaded, &catalog).unwrap();
    assert_eq!(reopened.active_dictionaries(GroupContext::Popup).len(), 2);
}

#[test]
fn test_rejected_edit_leaves_stored_file_unchanged() {
    let tmp = TempRoot::new();
    let store = tmp.store();
    let catalog = tmp.manifest(MANIFEST);
    let mut config = store.load().unwrap();
    config.groups.push(PersistedGroup::new("Empty"));
    store.save(&config).unwrap();
    let before = std::fs::read(tmp.0.join(CONFIG_FILE_NAME)).unwrap();

    let mut session = EditingSession::open(store.load().unwrap(), &catalog).unwrap();
    let result = session.remove_dictionaries(0, 0, 1);

    assert!(matches!(result, Err(SessionError::Edit(_))));
    assert_eq!(std::fs::read(tmp.0.join(CONFIG_FILE_NAME)).unwrap(), before);
}
