//! In-memory configuration model.
//!
//! [`Configuration`] is the typed form of the per-user configuration document.
//! It is produced once at startup by the document codec
//! ([`crate::document::parse_document`]), edited in memory during a session,
//! and rendered back on explicit save points.  Field order in every sequence is
//! significant and survives a load/save cycle unchanged.

pub mod modifiers;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use modifiers::ScanPopupModifiers;

/// Root of the persisted configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Dictionary search paths, in scan order.  Duplicates are tolerated.
    pub paths: Vec<String>,
    /// User-defined groups, in tab order.
    pub groups: Vec<PersistedGroup>,
    pub preferences: Preferences,
    /// Group last selected in the main window; empty means none.
    pub last_main_group: String,
    /// Group last selected in the scan popup; empty means none.
    pub last_popup_group: String,
}

impl Configuration {
    /// Returns the first group called `name`.  Group names are not unique.
    pub fn group_named(&self, name: &str) -> Option<&PersistedGroup> {
        self.groups.iter().find(|g| g.name == name)
    }
}

/// A group as stored on disk: dictionaries are referenced by identifier only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedGroup {
    pub name: String,
    /// Icon file name; empty means no icon.
    pub icon: String,
    /// Dictionary identifiers in lookup-priority order.  May name dictionaries
    /// that are no longer present in the catalog.
    pub dictionary_ids: Vec<String>,
}

impl PersistedGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// User preferences.  Every flag defaults to `false`, the mask to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub enable_tray_icon: bool,
    pub start_to_tray: bool,
    pub close_to_tray: bool,
    pub enable_scan_popup: bool,
    pub enable_scan_popup_modifiers: bool,
    /// Only meaningful while `enable_scan_popup_modifiers` is set.
    pub scan_popup_modifiers: ScanPopupModifiers,
}

impl Preferences {
    /// Mutable access to a boolean preference.  Returns `None` for
    /// [`PreferenceKey::ScanPopupModifiers`], which is not a flag.
    pub fn flag_mut(&mut self, key: PreferenceKey) -> Option<&mut bool> {
        match key {
            PreferenceKey::EnableTrayIcon => Some(&mut self.enable_tray_icon),
            PreferenceKey::StartToTray => Some(&mut self.start_to_tray),
            PreferenceKey::CloseToTray => Some(&mut self.close_to_tray),
            PreferenceKey::EnableScanPopup => Some(&mut self.enable_scan_popup),
            PreferenceKey::EnableScanPopupModifiers => Some(&mut self.enable_scan_popup_modifiers),
            PreferenceKey::ScanPopupModifiers => None,
        }
    }

    /// Reads a boolean preference.  Returns `None` for the modifier mask.
    pub fn flag(&self, key: PreferenceKey) -> Option<bool> {
        match key {
            PreferenceKey::EnableTrayIcon => Some(self.enable_tray_icon),
            PreferenceKey::StartToTray => Some(self.start_to_tray),
            PreferenceKey::CloseToTray => Some(self.close_to_tray),
            PreferenceKey::EnableScanPopup => Some(self.enable_scan_popup),
            PreferenceKey::EnableScanPopupModifiers => Some(self.enable_scan_popup_modifiers),
            PreferenceKey::ScanPopupModifiers => None,
        }
    }
}

/// Names of the preference fields, as they appear in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    EnableTrayIcon,
    StartToTray,
    CloseToTray,
    EnableScanPopup,
    EnableScanPopupModifiers,
    ScanPopupModifiers,
}

impl PreferenceKey {
    /// Document order.
    pub const ALL: [PreferenceKey; 6] = [
        PreferenceKey::EnableTrayIcon,
        PreferenceKey::StartToTray,
        PreferenceKey::CloseToTray,
        PreferenceKey::EnableScanPopup,
        PreferenceKey::EnableScanPopupModifiers,
        PreferenceKey::ScanPopupModifiers,
    ];

    pub const fn element_name(self) -> &'static str {
        match self {
            PreferenceKey::EnableTrayIcon => "enableTrayIcon",
            PreferenceKey::StartToTray => "startToTray",
            PreferenceKey::CloseToTray => "closeToTray",
            PreferenceKey::EnableScanPopup => "enableScanPopup",
            PreferenceKey::EnableScanPopupModifiers => "enableScanPopupModifiers",
            PreferenceKey::ScanPopupModifiers => "scanPopupModifiers",
        }
    }
}

impl fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_name())
    }
}

/// Error returned when a string names no preference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown preference: {0}")]
pub struct UnknownPreference(pub String);

impl FromStr for PreferenceKey {
    type Err = UnknownPreference;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PreferenceKey::ALL
            .into_iter()
            .find(|k| k.element_name() == s)
            .ok_or_else(|| UnknownPreference(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration_is_empty() {
        let cfg = Configuration::default();

        assert!(cfg.paths.is_empty());
        assert!(cfg.groups.is_empty());
        assert_eq!(cfg.preferences, Preferences::default());
        assert!(cfg.last_main_group.is_empty());
        assert!(cfg.last_popup_group.is_empty());
    }

    #[test]
    fn test_default_preferences_are_all_off() {
        let prefs = Preferences::default();

        for key in PreferenceKey::ALL {
            assert_ne!(prefs.flag(key), Some(true), "{key} must default to off");
        }
        assert!(prefs.scan_popup_modifiers.is_empty());
    }

    #[test]
    fn test_group_named_returns_first_match() {
        let mut cfg = Configuration::default();
        let mut first = PersistedGroup::new("Work");
        first.icon = "de.png".to_string();
        cfg.groups.push(first);
        cfg.groups.push(PersistedGroup::new("Work"));

        let found = cfg.group_named("Work").unwrap();

        assert_eq!(found.icon, "de.png");
        assert!(cfg.group_named("Home").is_none());
    }

    #[test]
    fn test_preference_key_parses_element_names() {
        for key in PreferenceKey::ALL {
            assert_eq!(key.element_name().parse::<PreferenceKey>(), Ok(key));
        }
        assert_eq!(
            "trayIcon".parse::<PreferenceKey>(),
            Err(UnknownPreference("trayIcon".to_string()))
        );
    }

    #[test]
    fn test_flag_mut_updates_matching_field() {
        let mut prefs = Preferences::default();

        *prefs.flag_mut(PreferenceKey::CloseToTray).unwrap() = true;

        assert!(prefs.close_to_tray);
        assert!(prefs.flag_mut(PreferenceKey::ScanPopupModifiers).is_none());
    }
}
