/// Keyboard input records delivered by the host event loop.
///
/// Only enough structure to recognize the clipboard shortcuts the
/// keydown observer cares about.

/// Modifier key states accompanying a key press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl held on its own.
    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::default()
        }
    }

    /// Check if any modifiers beyond shift are active.
    pub fn has_modifiers(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// Action associated with a clipboard keyboard shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Copy,
    Cut,
    Paste,
}

/// One key press as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub ch: char,
    pub mods: Modifiers,
}

impl KeyInput {
    pub fn new(ch: char, mods: Modifiers) -> Self {
        Self { ch, mods }
    }

    /// Classify the press as a clipboard shortcut: Ctrl+C, Ctrl+X or
    /// Ctrl+V with no other modifiers involved.
    pub fn shortcut(&self) -> Option<ShortcutAction> {
        if !self.mods.ctrl || self.mods.alt || self.mods.meta {
            return None;
        }
        match self.ch.to_ascii_lowercase() {
            'c' => Some(ShortcutAction::Copy),
            'x' => Some(ShortcutAction::Cut),
            'v' => Some(ShortcutAction::Paste),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clipboard_shortcuts() {
        let ctrl = Modifiers::ctrl();
        assert_eq!(KeyInput::new('c', ctrl).shortcut(), Some(ShortcutAction::Copy));
        assert_eq!(KeyInput::new('x', ctrl).shortcut(), Some(ShortcutAction::Cut));
        assert_eq!(KeyInput::new('v', ctrl).shortcut(), Some(ShortcutAction::Paste));
        assert_eq!(KeyInput::new('C', ctrl).shortcut(), Some(ShortcutAction::Copy));
    }

    #[test]
    fn test_non_shortcuts() {
        let ctrl = Modifiers::ctrl();
        assert_eq!(KeyInput::new('q', ctrl).shortcut(), None);
        assert_eq!(KeyInput::new('c', Modifiers::default()).shortcut(), None);

        let ctrl_alt = Modifiers {
            ctrl: true,
            alt: true,
            ..Modifiers::default()
        };
        assert_eq!(KeyInput::new('c', ctrl_alt).shortcut(), None);
    }

    #[test]
    fn test_has_modifiers() {
        assert!(Modifiers::ctrl().has_modifiers());
        assert!(!Modifiers::default().has_modifiers());
        let shift_only = Modifiers {
            shift: true,
            ..Modifiers::default()
        };
        assert!(!shift_only.has_modifiers());
    }
}
