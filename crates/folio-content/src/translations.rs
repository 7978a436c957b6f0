//! Translated static strings.
//!
//! The document is a JSON object keyed by language code, each holding a
//! flat `key -> text` map. Lookups never fail: a missing key yields the
//! caller's fallback text unchanged.

use std::collections::HashMap;

use folio_types::Language;
use folio_types::error::Result;

/// Translation table: language -> (key -> display text).
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    tables: HashMap<Language, HashMap<String, String>>,
}

impl TranslationTable {
    /// An empty table; every lookup falls back.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the translation document.
    ///
    /// Sections for unsupported language codes are skipped with a warning.
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: HashMap<String, HashMap<String, String>> = serde_json::from_str(text)?;
        let mut tables = HashMap::new();
        for (code, entries) in raw {
            match Language::from_code(&code) {
                Some(lang) => {
                    tables.insert(lang, entries);
                },
                None => log::warn!("Skipping translations for unsupported language '{code}'"),
            }
        }
        Ok(Self { tables })
    }

    /// Add or replace one entry.
    pub fn insert(&mut self, lang: Language, key: &str, text: &str) {
        self.tables
            .entry(lang)
            .or_default()
            .insert(key.to_string(), text.to_string());
    }

    /// Look up `key` in `lang`.
    pub fn get(&self, lang: Language, key: &str) -> Option<&str> {
        self.tables
            .get(&lang)
            .and_then(|t| t.get(key))
            .map(String::as_str)
    }

    /// Look up `key` in `lang`, leaving `fallback` in place when missing.
    pub fn text<'a>(&'a self, lang: Language, key: &str, fallback: &'a str) -> &'a str {
        self.get(lang, key).unwrap_or(fallback)
    }

    /// Languages with at least one entry.
    pub fn languages(&self) -> Vec<Language> {
        let mut langs: Vec<Language> = self.tables.keys().copied().collect();
        langs.sort();
        langs
    }
}
