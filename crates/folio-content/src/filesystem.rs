//! The named content blocks consulted by terminal content commands.
//!
//! A [`FileSystem`] is rebuilt whenever the session language, privilege or
//! the underlying project list changes. It is the single source of truth
//! for `about`, `contact`, `ls`/`projects` and `view`.

use folio_types::{Language, Privilege, Style, StyledLine};

use crate::record::ProjectRecord;
use crate::translations::TranslationTable;

// Translation keys and their built-in (English) fallbacks.
const ABOUT_IDENTIFY_LABEL: (&str, &str) = ("about.label.identify", "IDENTIFY:");
const ABOUT_IDENTIFY: (&str, &str) = ("about.identify", "ANTIGRAVITY AGENT");
const ABOUT_ROLE_LABEL: (&str, &str) = ("about.label.role", "ROLE:");
const ABOUT_ROLE: (&str, &str) = ("about.role", "Lead Frontend Engineer");
const ABOUT_SPECIALTY_LABEL: (&str, &str) = ("about.label.specialty", "SPECIALTY:");
const ABOUT_SPECIALTY: (&str, &str) = (
    "about.specialty",
    "Terminal Brutalism, React, Systems Design",
);
const ABOUT_BIO: (&str, &str) = (
    "about.bio",
    "I am a digital architect obsessed with the raw aesthetic of early computing.\n\
     I build web experiences that are not just viewed, but traversed.",
);
const CONTACT_HEADING: (&str, &str) = ("contact.heading", "COMMS LINK:");
const CONTACT_REDACTED: (&str, &str) = (
    "contact.redacted",
    "CONTACT INFO REDACTED. AUTHORIZATION REQUIRED.",
);
const CONTACT_SECURE_HEADING: (&str, &str) = ("contact.secure_heading", "COMMS LINK [SECURE]:");
const CONTACT_EMAIL_LABEL: (&str, &str) = ("contact.label.email", "Email:");
const CONTACT_EMAIL: (&str, &str) = ("contact.email", "guest@antigrabity.io");
const CONTACT_GITHUB_LABEL: (&str, &str) = ("contact.label.github", "GitHub:");
const CONTACT_GITHUB: (&str, &str) = ("contact.github", "github.com/antigrabity");
const PROJECT_LINK_LABEL: (&str, &str) = ("project.label.link", "LINK:");

const RULE: &str = "-------------------------";

/// A renderable block of styled lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    lines: Vec<StyledLine>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>, style: Style) {
        self.lines.push(StyledLine::new(text, style));
    }

    /// Push each line of a possibly multi-line string.
    pub fn push_text(&mut self, text: &str, style: Style) {
        for line in text.lines() {
            self.push(line, style);
        }
    }

    pub fn blank(&mut self) {
        self.push("", Style::Plain);
    }

    pub fn lines(&self) -> &[StyledLine] {
        &self.lines
    }

    /// The block as plain text, one line per row.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One project's entry in the file system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEntry {
    pub id: String,
    /// Localized display title.
    pub title: String,
    pub block: Block,
}

/// The object names a content command can resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentKey {
    About,
    Contact,
    /// The unredacted contact block; only resolvable for admins.
    ContactAdmin,
    ProjectById(String),
}

impl ContentKey {
    /// Map an object name typed at the terminal to a key. Anything that is
    /// not a fixed block name is treated as a project id.
    pub fn parse(name: &str) -> ContentKey {
        match name {
            "about" => ContentKey::About,
            "contact" => ContentKey::Contact,
            "contact_admin" => ContentKey::ContactAdmin,
            id => ContentKey::ProjectById(id.to_string()),
        }
    }
}

/// Content blocks for one language and privilege.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSystem {
    language: Language,
    privilege: Privilege,
    about: Block,
    contact: Block,
    contact_admin: Block,
    projects: Vec<ProjectEntry>,
}

impl FileSystem {
    /// Build every block from the translation table and project list.
    pub fn build(
        translations: &TranslationTable,
        projects: &[ProjectRecord],
        language: Language,
        privilege: Privilege,
    ) -> Self {
        let t = |(key, fallback): (&str, &'static str)| -> String {
            translations.text(language, key, fallback).to_string()
        };

        let mut about = Block::new();
        about.push(
            format!("{} {}", t(ABOUT_IDENTIFY_LABEL), t(ABOUT_IDENTIFY)),
            Style::Plain,
        );
        about.push(format!("{} {}", t(ABOUT_ROLE_LABEL), t(ABOUT_ROLE)), Style::Plain);
        about.push(
            format!("{} {}", t(ABOUT_SPECIALTY_LABEL), t(ABOUT_SPECIALTY)),
            Style::Plain,
        );
        about.blank();
        about.push_text(&t(ABOUT_BIO), Style::Plain);

        let mut contact_admin = Block::new();
        contact_admin.push(t(CONTACT_SECURE_HEADING), Style::Heading);
        contact_admin.blank();
        contact_admin.push(
            format!("{} {}", t(CONTACT_EMAIL_LABEL), t(CONTACT_EMAIL)),
            Style::Link,
        );
        contact_admin.push(
            format!("{} {}", t(CONTACT_GITHUB_LABEL), t(CONTACT_GITHUB)),
            Style::Link,
        );

        let contact = if privilege.is_admin() {
            contact_admin.clone()
        } else {
            let mut redacted = Block::new();
            redacted.push(t(CONTACT_HEADING), Style::Heading);
            redacted.blank();
            redacted.push(t(CONTACT_REDACTED), Style::Error);
            redacted
        };

        let link_label = t(PROJECT_LINK_LABEL);
        let projects = projects
            .iter()
            .map(|record| {
                let view = record.localize(language);
                let title = view.display_title().to_string();
                let mut block = Block::new();
                block.push(title.clone(), Style::Heading);
                block.push(RULE, Style::Plain);
                block.push_text(view.brief, Style::Plain);
                if let Some(link) = view.link {
                    block.push(format!("{link_label} {link}"), Style::Link);
                }
                ProjectEntry {
                    id: record.id.clone(),
                    title,
                    block,
                }
            })
            .collect();

        Self {
            language,
            privilege,
            about,
            contact,
            contact_admin,
            projects,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn privilege(&self) -> Privilege {
        self.privilege
    }

    pub fn about(&self) -> &Block {
        &self.about
    }

    /// The contact block as the current privilege sees it.
    pub fn contact(&self) -> &Block {
        &self.contact
    }

    /// The full contact block, regardless of privilege.
    pub fn contact_admin(&self) -> &Block {
        &self.contact_admin
    }

    pub fn projects(&self) -> &[ProjectEntry] {
        &self.projects
    }

    /// Resolve a key to its block. `None` means the object does not exist
    /// for this privilege.
    pub fn lookup(&self, key: &ContentKey) -> Option<&Block> {
        match key {
            ContentKey::About => Some(&self.about),
            ContentKey::Contact => Some(&self.contact),
            ContentKey::ContactAdmin => self
                .privilege
                .is_admin()
                .then_some(&self.contact_admin),
            ContentKey::ProjectById(id) => self
                .projects
                .iter()
                .find(|p| &p.id == id)
                .map(|p| &p.block),
        }
    }

    /// Resolve an object name typed at the terminal.
    pub fn get(&self, name: &str) -> Option<&Block> {
        self.lookup(&ContentKey::parse(name))
    }
}
