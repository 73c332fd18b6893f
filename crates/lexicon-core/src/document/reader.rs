//! Document → [`Configuration`] mapping.

use tracing::debug;

use super::tree::{self, Element};
use super::{DocumentError, ROOT_ELEMENT};
use crate::config::{Configuration, PersistedGroup, PreferenceKey, Preferences, ScanPopupModifiers};

/// Parses a configuration document.
///
/// Every section is optional and falls back to its default.  A document
/// element with a name other than `config` yields the default configuration.
///
/// # Errors
///
/// Returns [`DocumentError`] if `input` is not well-formed XML.
///
/// # Examples
///
/// ```rust
/// use lexicon_core::document::parse_document;
///
/// let cfg = parse_document("<config><paths><path>/dicts</path></paths></config>").unwrap();
/// assert_eq!(cfg.paths, ["/dicts"]);
/// assert!(cfg.groups.is_empty());
/// ```
pub fn parse_document(input: &str) -> Result<Configuration, DocumentError> {
    let root = tree::parse(input)?;
    Ok(configuration(&root))
}

fn configuration(root: &Element) -> Configuration {
    if root.name != ROOT_ELEMENT {
        debug!(root = %root.name, "document element is not <{ROOT_ELEMENT}>; using defaults");
        return Configuration::default();
    }

    let paths = root
        .child("paths")
        .map(|paths| paths.children_named("path").map(|p| p.text.clone()).collect())
        .unwrap_or_default();

    let groups = root
        .child("groups")
        .map(|groups| groups.children_named("group").map(group).collect())
        .unwrap_or_default();

    let preferences = root.child("preferences").map(preferences).unwrap_or_default();

    Configuration {
        paths,
        groups,
        preferences,
        last_main_group: root.child_text("lastMainGroup").to_string(),
        last_popup_group: root.child_text("lastPopupGroup").to_string(),
    }
}

fn group(element: &Element) -> PersistedGroup {
    PersistedGroup {
        name: element.attribute("name").unwrap_or_default().to_string(),
        icon: element.attribute("icon").unwrap_or_default().to_string(),
        dictionary_ids: element
            .children_named("dictionary")
            .map(|d| d.text.clone())
            .collect(),
    }
}

fn preferences(element: &Element) -> Preferences {
    let mut prefs = Preferences::default();

    for key in PreferenceKey::ALL {
        let text = element.child_text(key.element_name());
        match prefs.flag_mut(key) {
            Some(flag) => *flag = text == "1",
            None => prefs.scan_popup_modifiers = ScanPopupModifiers(text.parse().unwrap_or(0)),
        }
    }

    prefs
}
