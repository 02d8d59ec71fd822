#![forbid(unsafe_code)]

//! Keyboard events routed to open overlays.
//!
//! Only the keys that participate in overlay coordination get dedicated
//! variants (`Tab`, `BackTab`, `Escape`). Everything else travels as
//! [`KeyCode::Char`] or [`KeyCode::Other`] so hosts can forward their native
//! events without a lossy pre-filter.

use bitflags::bitflags;

bitflags! {
    /// Modifier keys held while a key event fired.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const CTRL  = 0b0000_0010;
        const ALT   = 0b0000_0100;
        const SUPER = 0b0000_1000;
    }
}

/// Logical key identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Tab,
    /// Shift+Tab as reported by hosts that fold the modifier into the code.
    BackTab,
    Escape,
    Enter,
    Char(char),
    /// Any key without a dedicated variant.
    Other,
}

/// Press/repeat/release phase of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    #[default]
    Press,
    Repeat,
    Release,
}

/// A single keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// A press of `code` with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
            kind: KeyEventKind::Press,
        }
    }

    /// Replace the modifier set.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Replace the event phase.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether the event is a press or auto-repeat (not a release).
    #[inline]
    #[must_use]
    pub fn is_down(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }

    /// Direction of a focus-cycling key, if this is one.
    ///
    /// `Tab` moves forward unless Shift is held; `BackTab` always moves
    /// backward.
    #[must_use]
    pub fn tab_direction(&self) -> Option<TabDirection> {
        match self.code {
            KeyCode::Tab if self.modifiers.contains(Modifiers::SHIFT) => {
                Some(TabDirection::Backward)
            }
            KeyCode::Tab => Some(TabDirection::Forward),
            KeyCode::BackTab => Some(TabDirection::Backward),
            _ => None,
        }
    }
}

/// Direction of sequential focus navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabDirection {
    Forward,
    Backward,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_tab_moves_forward() {
        let key = KeyEvent::new(KeyCode::Tab);
        assert_eq!(key.tab_direction(), Some(TabDirection::Forward));
    }

    #[test]
    fn shift_tab_moves_backward() {
        let key = KeyEvent::new(KeyCode::Tab).with_modifiers(Modifiers::SHIFT);
        assert_eq!(key.tab_direction(), Some(TabDirection::Backward));

        let back = KeyEvent::new(KeyCode::BackTab);
        assert_eq!(back.tab_direction(), Some(TabDirection::Backward));
    }

    #[test]
    fn non_tab_keys_have_no_direction() {
        assert_eq!(KeyEvent::new(KeyCode::Escape).tab_direction(), None);
        assert_eq!(KeyEvent::new(KeyCode::Char('a')).tab_direction(), None);
    }

    #[test]
    fn release_is_not_down() {
        let key = KeyEvent::new(KeyCode::Escape).with_kind(KeyEventKind::Release);
        assert!(!key.is_down());
        assert!(KeyEvent::new(KeyCode::Escape).is_down());
        assert!(
            KeyEvent::new(KeyCode::Escape)
                .with_kind(KeyEventKind::Repeat)
                .is_down()
        );
    }
}
