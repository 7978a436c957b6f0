//! Session privilege levels.

use std::fmt;

/// The two-level access state of a terminal session.
///
/// This is a cosmetic gate over which content variant is shown, not a
/// security boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Privilege {
    #[default]
    Guest,
    Admin,
}

impl Privilege {
    /// The literal name shown in the prompt (`guest@host:~$`).
    pub fn name(self) -> &'static str {
        match self {
            Privilege::Guest => "guest",
            Privilege::Admin => "admin",
        }
    }

    pub fn is_admin(self) -> bool {
        self == Privilege::Admin
    }
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
