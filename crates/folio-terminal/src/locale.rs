//! Session language resolution and the preference store it persists to.
//!
//! Priority at session start: explicit `lang=` query parameter, then the
//! stored preference, then a page's fixed language, then the configured
//! default. Whatever wins is written back under [`LANG_KEY`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use folio_content::persist;
use folio_types::Language;
use folio_types::error::{FolioError, Result};

/// Preference key holding the chosen language code.
pub const LANG_KEY: &str = "lang";

/// Durable string key-value store.
pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Preferences that live only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: BTreeMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept in a flat JSON object on disk.
///
/// The file is read once on open and rewritten on every `set`. A missing
/// file is an empty store.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePreferences {
    pub fn open(path: &Path) -> Result<Self> {
        let values = if path.is_file() {
            let text = std::fs::read_to_string(path)?;
            serde_json::from_str(&text).map_err(|e| {
                FolioError::Persistence(format!("{}: {e}", path.display()))
            })?
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path: path.to_path_buf(),
            values,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        persist::write_pretty_json(&self.path, &self.values)
    }
}

/// What kind of page the terminal is embedded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageKind {
    /// The language follows the visitor's choice.
    #[default]
    Configurable,
    /// A static page only available in one language.
    Fixed(Language),
}

/// Extract the `lang` parameter from a query string such as `?lang=ja&x=1`.
/// The last occurrence wins; an empty value counts as absent.
pub fn query_language(query: &str) -> Option<&str> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .filter(|(key, value)| *key == LANG_KEY && !value.is_empty())
        .map(|(_, value)| value)
        .next_back()
}

/// Pick the session language. The first source that is present decides;
/// an unrecognised code in it yields `default`.
pub fn resolve_language(
    query: Option<&str>,
    stored: Option<&str>,
    page: PageKind,
    default: Language,
) -> Language {
    if let Some(code) = query.or(stored) {
        return Language::from_code_or(code, default);
    }
    match page {
        PageKind::Fixed(lang) => lang,
        PageKind::Configurable => default,
    }
}

/// Resolve the session language from a query string and the store, then
/// persist the result so the next session starts the same way.
pub fn init_language(
    prefs: &mut dyn PreferenceStore,
    query: &str,
    page: PageKind,
    default: Language,
) -> Language {
    let stored = prefs.get(LANG_KEY);
    let lang = resolve_language(query_language(query), stored.as_deref(), page, default);
    if let Err(e) = prefs.set(LANG_KEY, lang.code()) {
        log::warn!("Could not persist language preference: {e}");
    }
    log::info!("Session language: {lang}");
    lang
}
