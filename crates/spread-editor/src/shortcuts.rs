//! Keyboard mapping for the canvas.
//!
//! Only two keys matter to the canvas itself: the configurable pan key
//! (held) and Escape. Everything else is left to the host page.

/// Actions a key press can trigger on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Held modifier that turns presses into pan gestures.
    PanHold,
    /// Drop active card and multi-selection.
    ClearSelection,
}

/// Resolves `KeyboardEvent.key` values into canvas actions.
#[derive(Debug, Clone)]
pub struct KeyMap {
    pan_key: String,
}

impl KeyMap {
    pub fn new(pan_key: impl Into<String>) -> Self {
        Self {
            pan_key: pan_key.into(),
        }
    }

    pub fn pan_key(&self) -> &str {
        &self.pan_key
    }

    /// Resolve a key to an action, or `None` if the canvas ignores it.
    ///
    /// Keys typed into a text field never resolve: the pan key is often
    /// Space, which must stay typeable.
    pub fn resolve(&self, key: &str, text_entry_focused: bool) -> Option<KeyAction> {
        if text_entry_focused {
            return None;
        }
        if key == self.pan_key {
            return Some(KeyAction::PanHold);
        }
        match key {
            "Escape" => Some(KeyAction::ClearSelection),
            _ => None,
        }
    }

    /// Whether releasing `key` ends a pan hold.
    pub fn releases_pan(&self, key: &str) -> bool {
        key == self.pan_key
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_holds_pan_by_default() {
        let keys = KeyMap::default();
        assert_eq!(keys.resolve(" ", false), Some(KeyAction::PanHold));
        assert!(keys.releases_pan(" "));
    }

    #[test]
    fn text_entry_swallows_everything() {
        let keys = KeyMap::default();
        assert_eq!(keys.resolve(" ", true), None);
        assert_eq!(keys.resolve("Escape", true), None);
    }

    #[test]
    fn custom_pan_key() {
        let keys = KeyMap::new("Alt");
        assert_eq!(keys.resolve("Alt", false), Some(KeyAction::PanHold));
        assert_eq!(keys.resolve(" ", false), None);
        assert!(!keys.releases_pan(" "));
    }

    #[test]
    fn escape_clears() {
        assert_eq!(
            KeyMap::default().resolve("Escape", false),
            Some(KeyAction::ClearSelection)
        );
    }

    #[test]
    fn unknown_key() {
        assert_eq!(KeyMap::default().resolve("q", false), None);
    }
}
