//! Configuration
//!
//! Layered configuration loaded once at startup and threaded into the session.
//! Precedence (lowest to highest): defaults, global config file (or an explicit
//! `--config` file), `VAULTPICK_*` environment, `TIPS_VAULT` / `OBSIDIAN_VAULT`.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;

use crate::logging::LoggingConfig;
use crate::types::VaultKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VaultpickConfig {
    #[serde(default)]
    pub vault: VaultOverrides,

    #[serde(default)]
    pub editor: EditorConfig,

    #[serde(default)]
    pub selector: SelectorConfig,

    #[serde(default)]
    pub sync: SyncConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Explicit vault locations. An override that is set must be valid; the
/// locator never falls back to discovery once one is given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultOverrides {
    #[serde(default)]
    pub tips: Option<PathBuf>,

    #[serde(default)]
    pub obsidian: Option<PathBuf>,
}

impl VaultOverrides {
    /// Override for `kind`, ignoring empty values.
    pub fn for_kind(&self, kind: VaultKind) -> Option<&Path> {
        let path = match kind {
            VaultKind::Tips => self.tips.as_deref(),
            VaultKind::Obsidian => self.obsidian.as_deref(),
        };
        path.filter(|p| !p.as_os_str().is_empty())
    }
}

fn default_editor_fallbacks() -> Vec<String> {
    ["edit", "vim", "nano", "emacs"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Editor resolution: `command`, then `$EDITOR`, then the first fallback on PATH.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default)]
    pub command: Option<String>,

    #[serde(default = "default_editor_fallbacks")]
    pub fallbacks: Vec<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            command: None,
            fallbacks: default_editor_fallbacks(),
        }
    }
}

fn default_selector_program() -> String {
    "fzf".to_string()
}

fn default_selector_height() -> String {
    "40%".to_string()
}

fn default_true() -> bool {
    true
}

/// Fuzzy selector invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    #[serde(default = "default_selector_program")]
    pub program: String,

    #[serde(default = "default_selector_height")]
    pub height: String,

    #[serde(default = "default_true")]
    pub border: bool,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            program: default_selector_program(),
            height: default_selector_height(),
            border: default_true(),
        }
    }
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Upper bound for the background `git fetch`.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}
