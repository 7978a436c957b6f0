//! The loaded content store.

use std::path::Path;

use folio_types::error::{FolioError, Result};
use folio_types::{Language, Privilege};

use crate::filesystem::FileSystem;
use crate::persist;
use crate::record::ProjectRecord;
use crate::translations::TranslationTable;

/// Translation table plus the ordered project list.
///
/// Loaded once at startup. The terminal only reads it; an editor may
/// replace the project list, which bumps [`ContentStore::revision`] so
/// readers know to rebuild their file system.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    translations: TranslationTable,
    projects: Vec<ProjectRecord>,
    revision: u64,
}

impl ContentStore {
    pub fn new(translations: TranslationTable, projects: Vec<ProjectRecord>) -> Self {
        Self {
            translations,
            projects,
            revision: 0,
        }
    }

    /// Parse both documents from JSON text.
    pub fn from_json(translations: &str, projects: &str) -> Result<Self> {
        let translations = TranslationTable::from_json(translations)
            .map_err(|e| FolioError::Content(format!("translations: {e}")))?;
        let projects: Vec<ProjectRecord> = serde_json::from_str(projects)
            .map_err(|e| FolioError::Content(format!("projects: {e}")))?;
        Ok(Self::new(translations, projects))
    }

    /// Load both documents from disk.
    pub fn load(translations_path: &Path, projects_path: &Path) -> Result<Self> {
        let read = |path: &Path| {
            std::fs::read_to_string(path)
                .map_err(|e| FolioError::Content(format!("{}: {e}", path.display())))
        };
        let store = Self::from_json(&read(translations_path)?, &read(projects_path)?)?;
        log::info!(
            "Loaded {} projects, translations for {:?}",
            store.projects.len(),
            store.translations.languages()
        );
        Ok(store)
    }

    pub fn translations(&self) -> &TranslationTable {
        &self.translations
    }

    pub fn projects(&self) -> &[ProjectRecord] {
        &self.projects
    }

    /// Changes every time the project list is replaced.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn find_by_id(&self, id: &str) -> Option<&ProjectRecord> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Replace the whole project list (editor save path).
    pub fn replace_projects(&mut self, projects: Vec<ProjectRecord>) {
        self.projects = projects;
        self.revision += 1;
        log::info!(
            "Project list replaced ({} records, revision {})",
            self.projects.len(),
            self.revision
        );
    }

    /// Persist the project list. The in-memory list is kept whether or
    /// not the write succeeds.
    pub fn save_projects(&self, path: &Path) -> Result<()> {
        persist::write_pretty_json(path, &self.projects)
    }

    /// Build the named content blocks for a language and privilege.
    pub fn build_file_system(&self, language: Language, privilege: Privilege) -> FileSystem {
        FileSystem::build(&self.translations, &self.projects, language, privilege)
    }
}
