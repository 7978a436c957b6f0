//! crossterm event conversion.

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind, KeyModifiers,
};
use folio_types::input::{Key, KeyEvent, Modifiers};

/// What the main loop should do with a terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Forward to the input controller.
    Key(KeyEvent),
    /// Leave the app (Escape, Ctrl+C, Ctrl+D).
    Quit,
    /// The window changed size.
    Redraw,
}

/// Convert a crossterm event. `None` for events the app ignores.
pub fn convert_event(event: &CrosstermEvent) -> Option<AppEvent> {
    match event {
        CrosstermEvent::Key(key) => convert_key_event(key),
        CrosstermEvent::Resize(..) => Some(AppEvent::Redraw),
        _ => None,
    }
}

fn convert_key_event(event: &CrosstermKeyEvent) -> Option<AppEvent> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let modifiers = convert_modifiers(event.modifiers);
    let key = match event.code {
        KeyCode::Esc => return Some(AppEvent::Quit),
        KeyCode::Char('c' | 'd') if modifiers.ctrl => return Some(AppEvent::Quit),
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Enter => Key::Enter,
        _ => Key::Other,
    };
    Some(AppEvent::Key(KeyEvent { key, modifiers }))
}

fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
        meta: mods.intersects(KeyModifiers::SUPER | KeyModifiers::META),
    }
}
