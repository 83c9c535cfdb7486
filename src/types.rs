//! Core types shared across the session workflow.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Extension (without the dot) of files treated as notes.
pub const NOTE_EXTENSION: &str = "md";

/// Marker directory that identifies a structured vault.
pub const VAULT_MARKER_DIR: &str = ".obsidian";

/// Kind of vault a session works against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VaultKind {
    /// Plain directory of markdown notes.
    Tips,
    /// Structured vault carrying a `.obsidian` marker directory.
    Obsidian,
}

impl VaultKind {
    /// Lowercase name, also used as the default directory name under home.
    pub fn name(self) -> &'static str {
        match self {
            VaultKind::Tips => "tips",
            VaultKind::Obsidian => "obsidian",
        }
    }
}

impl fmt::Display for VaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A resolved vault. Built once per session by the locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vault {
    root: PathBuf,
    kind: VaultKind,
}

impl Vault {
    pub fn new(root: PathBuf, kind: VaultKind) -> Self {
        Self { root, kind }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn kind(&self) -> VaultKind {
        self.kind
    }
}

/// A note file found while listing a vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// Path relative to the vault root.
    pub path: PathBuf,
    pub modified: SystemTime,
}

impl CandidateFile {
    /// Relative path as shown to the user and fed to the selector.
    pub fn display_path(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

/// Candidate files ordered most recently modified first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedList {
    entries: Vec<CandidateFile>,
}

impl RankedList {
    /// Sorts `entries` by modification time, newest first. The sort is stable,
    /// so entries with equal timestamps keep their traversal order.
    pub fn from_unsorted(mut entries: Vec<CandidateFile>) -> Self {
        entries.sort_by(|a, b| b.modified.cmp(&a.modified));
        Self { entries }
    }

    pub fn entries(&self) -> &[CandidateFile] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn display_paths(&self) -> Vec<String> {
        self.entries.iter().map(CandidateFile::display_path).collect()
    }
}

/// Divergence between local HEAD and its upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncStatus {
    pub behind: u64,
    pub ahead: u64,
}

impl SyncStatus {
    pub fn is_diverged(&self) -> bool {
        self.behind > 0 || self.ahead > 0
    }
}

/// Outcome of arbitration: a path relative to the vault, or nothing when the
/// user backed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Cancelled,
    Path(String),
}

impl Selection {
    /// Empty input means the user cancelled.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if raw.is_empty() {
            Selection::Cancelled
        } else {
            Selection::Path(raw)
        }
    }

    pub fn as_path(&self) -> Option<&str> {
        match self {
            Selection::Cancelled => None,
            Selection::Path(p) => Some(p),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Selection::Cancelled)
    }
}
