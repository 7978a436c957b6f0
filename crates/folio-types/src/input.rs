//! Platform-agnostic key events.
//!
//! Front ends map their native keyboard input to these types. The terminal
//! core never sees raw platform input.

/// A key that was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character.
    Char(char),
    /// Backspace / delete-left.
    Backspace,
    /// The "confirm line" key.
    Enter,
    /// Escape.
    Escape,
    /// Any key the terminal has no use for (arrows, function keys, ...).
    Other,
}

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Whether this is a chord (any of control, alt or meta held).
    pub fn is_chord(self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// A single key press with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key press with no modifiers.
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// A key press with the control modifier held.
    pub fn ctrl(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers {
                ctrl: true,
                ..Modifiers::NONE
            },
        }
    }
}

impl From<char> for KeyEvent {
    fn from(ch: char) -> Self {
        KeyEvent::plain(Key::Char(ch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_has_no_chord() {
        assert!(!KeyEvent::plain(Key::Enter).modifiers.is_chord());
    }

    #[test]
    fn ctrl_is_chord() {
        assert!(KeyEvent::ctrl(Key::Char('c')).modifiers.is_chord());
    }

    #[test]
    fn alt_and_meta_are_chords() {
        let alt = Modifiers {
            alt: true,
            ..Modifiers::NONE
        };
        let meta = Modifiers {
            meta: true,
            ..Modifiers::NONE
        };
        assert!(alt.is_chord());
        assert!(meta.is_chord());
    }

    #[test]
    fn char_conversion() {
        assert_eq!(KeyEvent::from('x'), KeyEvent::plain(Key::Char('x')));
    }
}
