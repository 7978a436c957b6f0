//! Per-terminal session state.

use folio_types::{Language, Privilege};

/// Privilege and language of one terminal session.
///
/// Owned by the [`Interpreter`](crate::Interpreter); the setters are
/// crate-private so nothing outside the interpreter can change privilege.
/// The pending input buffer lives in the
/// [`InputController`](crate::InputController).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Session {
    privilege: Privilege,
    language: Language,
}

impl Session {
    /// A fresh guest session in the given language.
    pub fn new(language: Language) -> Self {
        Self {
            privilege: Privilege::Guest,
            language,
        }
    }

    pub fn privilege(&self) -> Privilege {
        self.privilege
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// The prompt prefix, e.g. `guest@antigrabity:~$ `.
    pub fn prompt(&self, hostname: &str) -> String {
        format!("{}@{hostname}:~$ ", self.privilege)
    }

    pub(crate) fn set_privilege(&mut self, privilege: Privilege) {
        if self.privilege != privilege {
            log::info!("Privilege {} -> {}", self.privilege, privilege);
            self.privilege = privilege;
        }
    }

    pub(crate) fn set_language(&mut self, language: Language) {
        if self.language != language {
            log::info!("Language {} -> {}", self.language, language);
            self.language = language;
        }
    }
}
