//! Content store for folio.
//!
//! Holds the translation table and the project records loaded once at
//! startup, produces localized views of records, and builds the named
//! content blocks (the "file system") that terminal content commands read.

pub mod filesystem;
pub mod persist;
pub mod record;
mod store;
pub mod translations;

/// Named content blocks for one (language, privilege) pair.
pub use filesystem::{Block, ContentKey, FileSystem, ProjectEntry};
/// Project record types and their localized view.
pub use record::{LocalizedProject, ProjectOverride, ProjectRecord, SpecEntry};
/// The loaded content store.
pub use store::ContentStore;
/// Translated static strings keyed by language.
pub use translations::TranslationTable;
