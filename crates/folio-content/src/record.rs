//! Project records and per-language overrides.

use std::collections::BTreeMap;

use folio_types::Language;
use serde::{Deserialize, Serialize};

/// One `{label, value}` row of a project's spec sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecEntry {
    pub label: String,
    pub value: String,
}

/// A showcased project as stored in `projects.json`.
///
/// `id` is the stable object name used by `view <id>` and by the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub brief: String,
    #[serde(default)]
    pub demo_text: String,
    #[serde(default)]
    pub specs: Vec<SpecEntry>,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Partial records keyed by language code. Unset or empty fields fall
    /// back to the base value.
    #[serde(
        default,
        alias = "i18n",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub locale_overrides: BTreeMap<String, ProjectOverride>,
}

/// Per-language overrides for a [`ProjectRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brief: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specs: Option<Vec<SpecEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// A merged, read-only view of a record in one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedProject<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub name: &'a str,
    pub subtitle: &'a str,
    pub brief: &'a str,
    pub demo_text: &'a str,
    pub specs: &'a [SpecEntry],
    pub last_updated: &'a str,
    pub link: Option<&'a str>,
}

/// Pick the override if it is present and non-empty.
fn pick<'a>(base: &'a str, over: Option<&'a String>) -> &'a str {
    match over {
        Some(v) if !v.is_empty() => v.as_str(),
        _ => base,
    }
}

impl ProjectRecord {
    /// A record with only an id set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            name: String::new(),
            subtitle: String::new(),
            brief: String::new(),
            demo_text: String::new(),
            specs: Vec::new(),
            last_updated: String::new(),
            link: None,
            locale_overrides: BTreeMap::new(),
        }
    }

    /// The override sub-record for `lang`, if any.
    pub fn override_for(&self, lang: Language) -> Option<&ProjectOverride> {
        self.locale_overrides.get(lang.code())
    }

    /// Merge the `lang` overrides over the base fields.
    pub fn localize(&self, lang: Language) -> LocalizedProject<'_> {
        let ov = self.override_for(lang);
        let specs = match ov.and_then(|o| o.specs.as_ref()) {
            Some(s) if !s.is_empty() => s.as_slice(),
            _ => self.specs.as_slice(),
        };
        let link = match ov.and_then(|o| o.link.as_deref()) {
            Some(l) if !l.is_empty() => Some(l),
            _ => self.link.as_deref().filter(|l| !l.is_empty()),
        };
        LocalizedProject {
            id: &self.id,
            title: pick(&self.title, ov.and_then(|o| o.title.as_ref())),
            name: pick(&self.name, ov.and_then(|o| o.name.as_ref())),
            subtitle: pick(&self.subtitle, ov.and_then(|o| o.subtitle.as_ref())),
            brief: pick(&self.brief, ov.and_then(|o| o.brief.as_ref())),
            demo_text: pick(&self.demo_text, ov.and_then(|o| o.demo_text.as_ref())),
            specs,
            last_updated: pick(&self.last_updated, ov.and_then(|o| o.last_updated.as_ref())),
            link,
        }
    }
}

impl LocalizedProject<'_> {
    /// Heading shown in listings and blocks: the title, else the id.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            self.id
        } else {
            self.title
        }
    }
}
