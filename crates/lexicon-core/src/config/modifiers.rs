//! Keyboard modifiers gating the scan popup.

use serde::{Deserialize, Serialize};

use super::Preferences;

/// Bitmask of modifier keys that must be held for the scan popup to trigger.
///
/// Stored in the configuration document as its decimal value.  Bits that are
/// not listed below are kept as-is so a mask written by a newer build survives
/// a load/save cycle untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanPopupModifiers(pub u32);

impl ScanPopupModifiers {
    pub const ALT: u32 = 1 << 0;
    pub const CTRL: u32 = 1 << 1;
    pub const SHIFT: u32 = 1 << 2;
    pub const WIN: u32 = 1 << 3;

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if Alt is required.
    pub fn alt(&self) -> bool {
        self.0 & Self::ALT != 0
    }

    /// Returns `true` if Ctrl is required.
    pub fn ctrl(&self) -> bool {
        self.0 & Self::CTRL != 0
    }

    /// Returns `true` if Shift is required.
    pub fn shift(&self) -> bool {
        self.0 & Self::SHIFT != 0
    }

    /// Returns `true` if the Win / Super / Cmd key is required.
    pub fn win(&self) -> bool {
        self.0 & Self::WIN != 0
    }

    /// Returns a copy with `flag` set or cleared.
    #[must_use]
    pub fn with(self, flag: u32, on: bool) -> Self {
        if on {
            Self(self.0 | flag)
        } else {
            Self(self.0 & !flag)
        }
    }

    /// The mask the scan popup should honour, or `None` when modifier gating
    /// is switched off.  The stored mask is meaningless without the flag.
    pub fn effective(prefs: &Preferences) -> Option<Self> {
        prefs
            .enable_scan_popup_modifiers
            .then_some(prefs.scan_popup_modifiers)
    }
}

impl From<u32> for ScanPopupModifiers {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_report_individual_bits() {
        let m = ScanPopupModifiers(ScanPopupModifiers::CTRL | ScanPopupModifiers::WIN);

        assert!(m.ctrl());
        assert!(m.win());
        assert!(!m.alt());
        assert!(!m.shift());
    }

    #[test]
    fn test_with_sets_and_clears_flag() {
        let m = ScanPopupModifiers::default().with(ScanPopupModifiers::SHIFT, true);
        assert_eq!(m.bits(), 4);

        let m = m.with(ScanPopupModifiers::SHIFT, false);
        assert!(m.is_empty());
    }

    #[test]
    fn test_unknown_bits_are_preserved() {
        let m = ScanPopupModifiers(0x400 | ScanPopupModifiers::ALT);
        let m = m.with(ScanPopupModifiers::ALT, false);
        assert_eq!(m.bits(), 0x400);
    }

    #[test]
    fn test_effective_is_none_when_gating_disabled() {
        let prefs = Preferences {
            scan_popup_modifiers: ScanPopupModifiers(ScanPopupModifiers::ALT),
            ..Preferences::default()
        };

        assert_eq!(ScanPopupModifiers::effective(&prefs), None);
    }

    #[test]
    fn test_effective_returns_mask_when_gating_enabled() {
        let prefs = Preferences {
            enable_scan_popup_modifiers: true,
            scan_popup_modifiers: ScanPopupModifiers(ScanPopupModifiers::ALT),
            ..Preferences::default()
        };

        assert_eq!(
            ScanPopupModifiers::effective(&prefs),
            Some(ScanPopupModifiers(1))
        );
    }
}
