//! Runtime configuration loaded from `folio.toml`.
//!
//! Every field has a default, so an empty or missing file yields a working
//! configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::Result;
use crate::language::Language;

/// Environment variable naming the config file for the binaries.
pub const CONFIG_ENV: &str = "FOLIO_CONFIG";

/// Default config file name, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "folio.toml";

/// Whether project content is visible to guests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentPolicy {
    /// Projects and `view` are open to everyone; only contact is gated.
    #[default]
    Open,
    /// Guests get a redacted project listing and `view` is denied.
    Locked,
}

/// Save server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// TCP port to listen on.
    pub port: u16,
    /// Directory served for `GET` requests.
    pub static_root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            static_root: PathBuf::from("."),
        }
    }
}

/// Top-level folio configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Host segment of the prompt (`guest@<hostname>:~$`).
    pub hostname: String,
    /// Language used when nothing else decides.
    pub default_language: Language,
    /// Locked-content policy.
    pub content_policy: ContentPolicy,
    /// Per-character cadence of animated lines.
    pub typing_delay_ms: u64,
    /// Suspension of the `admin` command before access is granted.
    pub auth_delay_ms: u64,
    /// Pause between `&&`-chained sub-commands.
    pub chain_pause_ms: u64,
    /// Delay before a clicked command link is dispatched.
    pub link_delay_ms: u64,
    /// Print the boot banner (input is blocked while it runs).
    pub boot_sequence: bool,
    /// Translation table document.
    pub translations_path: PathBuf,
    /// Project list document.
    pub projects_path: PathBuf,
    /// Durable key-value store for preferences.
    pub preferences_path: PathBuf,
    pub server: ServerConfig,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            hostname: "antigrabity".to_string(),
            default_language: Language::En,
            content_policy: ContentPolicy::Open,
            typing_delay_ms: 10,
            auth_delay_ms: 1000,
            chain_pause_ms: 300,
            link_delay_ms: 200,
            boot_sequence: true,
            translations_path: PathBuf::from("data/translations.json"),
            projects_path: PathBuf::from("data/projects.json"),
            preferences_path: PathBuf::from("data/preferences.json"),
            server: ServerConfig::default(),
        }
    }
}

impl FolioConfig {
    /// Parse a config from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from `$FOLIO_CONFIG`, or `folio.toml` in the working directory.
    pub fn from_env() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load(&path)
    }

    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms)
    }

    pub fn auth_delay(&self) -> Duration {
        Duration::from_millis(self.auth_delay_ms)
    }

    pub fn chain_pause(&self) -> Duration {
        Duration::from_millis(self.chain_pause_ms)
    }

    pub fn link_delay(&self) -> Duration {
        Duration::from_millis(self.link_delay_ms)
    }
}
