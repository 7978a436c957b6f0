//! Foundation types for folio.
//!
//! Shared by every folio crate: the error type, the two session enums
//! (`Privilege`, `Language`), styled output lines, platform-agnostic key
//! events, and the TOML-backed configuration.

pub mod config;
pub mod error;
pub mod input;
pub mod language;
pub mod privilege;
pub mod style;

pub use language::Language;
pub use privilege::Privilege;
pub use style::{Style, StyledLine};
