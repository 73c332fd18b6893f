//! [`Configuration`] → document rendering.

use quick_xml::events::BytesText;
use quick_xml::Writer;

use super::{RenderError, ROOT_ELEMENT};
use crate::config::{Configuration, PersistedGroup, PreferenceKey, Preferences};

type XmlWriter = Writer<Vec<u8>>;

/// Renders `config` as a configuration document.
///
/// Output is a pure function of the input: element order is fixed, flags are
/// written as `"1"`/`"0"`, the modifier mask as a decimal number, and a
/// group's `icon` attribute is written only when it is non-empty.  Elements
/// are indented by one space; text never gets surrounding whitespace, so leaf
/// values read back exactly as written.
///
/// # Errors
///
/// Returns [`RenderError`] if the XML writer fails.  Rendering into memory
/// does not fail in practice.
///
/// # Examples
///
/// ```rust
/// use lexicon_core::config::Configuration;
/// use lexicon_core::document::{parse_document, render_document};
///
/// let mut cfg = Configuration::default();
/// cfg.paths.push("/dicts".to_string());
///
/// let text = render_document(&cfg).unwrap();
/// assert_eq!(parse_document(&text).unwrap(), cfg);
/// ```
pub fn render_document(config: &Configuration) -> Result<String, RenderError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 1);

    writer
        .create_element(ROOT_ELEMENT)
        .write_inner_content(|w| write_body(w, config))?;

    let mut text = String::from_utf8(writer.into_inner())?;
    text.push('\n');
    Ok(text)
}

fn write_body(w: &mut XmlWriter, config: &Configuration) -> Result<(), RenderError> {
    if config.paths.is_empty() {
        w.create_element("paths").write_empty()?;
    } else {
        w.create_element("paths").write_inner_content(|w| {
            for path in &config.paths {
                write_leaf(w, "path", path)?;
            }
            Ok::<_, RenderError>(())
        })?;
    }

    if config.groups.is_empty() {
        w.create_element("groups").write_empty()?;
    } else {
        w.create_element("groups").write_inner_content(|w| {
            for group in &config.groups {
                write_group(w, group)?;
            }
            Ok::<_, RenderError>(())
        })?;
    }

    w.create_element("preferences").write_inner_content(|w| {
        for key in PreferenceKey::ALL {
            write_leaf(w, key.element_name(), &preference_text(&config.preferences, key))?;
        }
        Ok::<_, RenderError>(())
    })?;

    write_leaf(w, "lastMainGroup", &config.last_main_group)?;
    write_leaf(w, "lastPopupGroup", &config.last_popup_group)?;
    Ok(())
}

fn write_group(w: &mut XmlWriter, group: &PersistedGroup) -> Result<(), RenderError> {
    let mut element = w
        .create_element("group")
        .with_attribute(("name", group.name.as_str()));
    if !group.icon.is_empty() {
        element = element.with_attribute(("icon", group.icon.as_str()));
    }

    if group.dictionary_ids.is_empty() {
        element.write_empty()?;
        return Ok(());
    }

    element.write_inner_content(|w| {
        for id in &group.dictionary_ids {
            write_leaf(w, "dictionary", id)?;
        }
        Ok::<_, RenderError>(())
    })?;
    Ok(())
}

/// `<name>text</name>`, or `<name/>` for empty text.
fn write_leaf(w: &mut XmlWriter, name: &str, text: &str) -> Result<(), RenderError> {
    let element = w.create_element(name);
    if text.is_empty() {
        element.write_empty()?;
    } else {
        element.write_text_content(BytesText::new(text))?;
    }
    Ok(())
}

fn preference_text(prefs: &Preferences, key: PreferenceKey) -> String {
    match prefs.flag(key) {
        Some(true) => "1".to_string(),
        Some(false) => "0".to_string(),
        None => prefs.scan_popup_modifiers.bits().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PersistedGroup, ScanPopupModifiers};
    use crate::document::parse_document;

    fn sample() -> Configuration {
        let mut cfg = Configuration::default();
        cfg.paths = vec!["/b".to_string(), "/a".to_string(), "/b".to_string()];
        cfg.groups.push(PersistedGroup {
            name: "Tom & Jerry's \"list\"".to_string(),
            icon: "us.png".to_string(),
            dictionary_ids: vec!["z".to_string(), "a<b".to_string(), "z".to_string()],
        });
        cfg.groups.push(PersistedGroup::new("Empty"));
        cfg.preferences.enable_scan_popup = true;
        cfg.preferences.enable_scan_popup_modifiers = true;
        cfg.preferences.scan_popup_modifiers = ScanPopupModifiers(4_000_000_000);
        cfg.last_main_group = "  spaced  ".to_string();
        cfg
    }

    #[test]
    fn test_render_default_configuration() {
        let expected = "\
<config>
 <paths/>
 <groups/>
 <preferences>
  <enableTrayIcon>0</enableTrayIcon>
  <startToTray>0</startToTray>
  <closeToTray>0</closeToTray>
  <enableScanPopup>0</enableScanPopup>
  <enableScanPopupModifiers>0</enableScanPopupModifiers>
  <scanPopupModifiers>0</scanPopupModifiers>
 </preferences>
 <lastMainGroup/>
 <lastPopupGroup/>
</config>
";
        assert_eq!(render_document(&Configuration::default()).unwrap(), expected);
    }

    #[test]
    fn test_render_is_deterministic() {
        let cfg = sample();
        assert_eq!(render_document(&cfg).unwrap(), render_document(&cfg.clone()).unwrap());
    }

    #[test]
    fn test_render_omits_empty_icon_attribute() {
        let text = render_document(&sample()).unwrap();

        assert!(text.contains("<group name=\"Empty\"/>"));
        assert!(text.contains("icon=\"us.png\""));
    }

    #[test]
    fn test_render_escapes_markup_in_text_and_attributes() {
        let text = render_document(&sample()).unwrap();

        assert!(text.contains("<dictionary>a&lt;b</dictionary>"));
        assert!(text.contains("name=\"Tom &amp; Jerry&apos;s &quot;list&quot;\""));
        assert!(text.contains("<lastMainGroup>  spaced  </lastMainGroup>"));
        assert!(text.ends_with("</config>\n"));
    }

    #[test]
    fn test_render_writes_flags_as_digits() {
        let text = render_document(&sample()).unwrap();

        assert!(text.contains("<enableScanPopup>1</enableScanPopup>"));
        assert!(text.contains("<enableTrayIcon>0</enableTrayIcon>"));
        assert!(text.contains("<scanPopupModifiers>4000000000</scanPopupModifiers>"));
    }

    #[test]
    fn test_render_then_parse_restores_every_field() {
        // Arrange
        let cfg = sample();

        // Act
        let restored = parse_document(&render_document(&cfg).unwrap()).expect("rendered text must parse");

        // Assert
        assert_eq!(restored, cfg);
    }
}
