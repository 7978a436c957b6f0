//! Input controller: turns key events into submitted lines.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use folio_types::input::{Key, KeyEvent};
use tokio::sync::mpsc;

/// Shared "boot sequence running" flag. While set, every key is dropped.
#[derive(Debug, Clone, Default)]
pub struct BootGate(Arc<AtomicBool>);

impl BootGate {
    pub fn new(booting: bool) -> Self {
        Self(Arc::new(AtomicBool::new(booting)))
    }

    pub fn is_booting(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Mark the boot sequence as finished.
    pub fn finish(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// What a key event did to the pending input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// Nothing changed.
    Ignored,
    /// The pending buffer changed.
    Edited,
    /// The buffer was handed to the interpreter and cleared.
    Submitted(String),
}

/// Accumulates keystrokes into the pending input line.
///
/// Submitting never waits for the interpreter: the line is queued and the
/// buffer is cleared straight away.
#[derive(Debug)]
pub struct InputController {
    pending: String,
    gate: BootGate,
    tx: mpsc::UnboundedSender<String>,
}

impl InputController {
    pub fn new(tx: mpsc::UnboundedSender<String>, gate: BootGate) -> Self {
        Self {
            pending: String::new(),
            gate,
            tx,
        }
    }

    /// The line typed so far.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn handle_key(&mut self, event: KeyEvent) -> InputAction {
        if self.gate.is_booting() || event.modifiers.is_chord() {
            return InputAction::Ignored;
        }
        match event.key {
            Key::Char(ch) if !ch.is_control() => {
                self.pending.push(ch);
                InputAction::Edited
            },
            Key::Backspace => match self.pending.pop() {
                Some(_) => InputAction::Edited,
                None => InputAction::Ignored,
            },
            Key::Enter => {
                let line = std::mem::take(&mut self.pending);
                if self.tx.send(line.clone()).is_err() {
                    log::warn!("Command queue closed, dropping '{line}'");
                }
                InputAction::Submitted(line)
            },
            _ => InputAction::Ignored,
        }
    }
}
