//! Display languages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A language the portfolio content is available in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ja,
}

impl Language {
    /// Every supported language, in display order.
    pub const ALL: [Language; 2] = [Language::En, Language::Ja];

    /// The short code used in documents, query strings and preferences.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ja => "ja",
        }
    }

    /// Parse a language code.
    ///
    /// Case-insensitive; region subtags (`ja-JP`, `en_US`) are accepted and
    /// ignored. Returns `None` for anything unrecognised.
    pub fn from_code(code: &str) -> Option<Language> {
        let lower = code.trim().to_ascii_lowercase();
        let primary = lower.split(['-', '_']).next().unwrap_or("");
        match primary {
            "en" => Some(Language::En),
            "ja" => Some(Language::Ja),
            _ => None,
        }
    }

    /// Parse a language code, falling back to `default` when unrecognised.
    pub fn from_code_or(code: &str, default: Language) -> Language {
        Self::from_code(code).unwrap_or_else(|| {
            log::debug!("Unknown language code '{code}', using {default}");
            default
        })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
