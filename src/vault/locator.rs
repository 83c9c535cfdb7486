use crate::config::{xdg, VaultOverrides};
use crate::error::ApiError;
use crate::types::{Vault, VaultKind, NOTE_EXTENSION, VAULT_MARKER_DIR};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolves a [`Vault`] for a given kind.
#[derive(Debug, Clone)]
pub struct VaultLocator {
    overrides: VaultOverrides,
    home: PathBuf,
}

impl VaultLocator {
    pub fn new(overrides: VaultOverrides, home: PathBuf) -> Self {
        Self { overrides, home }
    }

    /// Locator rooted at the current user's home directory.
    pub fn for_current_user(overrides: VaultOverrides) -> Result<Self, ApiError> {
        let home = xdg::home_dir().ok_or_else(|| {
            ApiError::ConfigError("Could not determine home directory".to_string())
        })?;
        Ok(Self::new(overrides, home))
    }

    /// Resolve the vault for `kind`.
    ///
    /// A configured override must be valid; it is never silently replaced by
    /// discovery. Without one, the first valid conventional location wins, and
    /// `~/<kind>` is returned when nothing validates.
    pub fn resolve(&self, kind: VaultKind) -> Result<Vault, ApiError> {
        if let Some(path) = self.overrides.for_kind(kind) {
            if !is_valid_vault(path) {
                return Err(ApiError::InvalidOverride {
                    kind,
                    path: path.to_path_buf(),
                });
            }
            let root = dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
            debug!(%kind, root = %root.display(), "Using vault override");
            return Ok(Vault::new(root, kind));
        }

        for candidate in self.candidates(kind) {
            if is_valid_vault(&candidate) {
                debug!(%kind, root = %candidate.display(), "Discovered vault");
                return Ok(Vault::new(candidate, kind));
            }
        }

        let fallback = self.default_path(kind);
        debug!(%kind, root = %fallback.display(), "No vault found, using default path");
        Ok(Vault::new(fallback, kind))
    }

    /// Conventional locations probed for `kind`, in order. Never deeper than two
    /// levels below home.
    pub fn candidates(&self, kind: VaultKind) -> Vec<PathBuf> {
        let home = &self.home;
        let documents = home.join("Documents");
        match kind {
            VaultKind::Tips => vec![
                home.join("tips"),
                documents.join("tips"),
                documents.join("Tips"),
                home.join("Notes"),
                home.join("notes"),
            ],
            VaultKind::Obsidian => vec![
                home.join("obsidian"),
                documents.join("Obsidian"),
                documents.join("Obsidian Vaults"),
            ],
        }
    }

    /// Path used when discovery finds nothing. Created on first write.
    pub fn default_path(&self, kind: VaultKind) -> PathBuf {
        self.home.join(kind.name())
    }
}

/// A directory is a vault when it holds a `.obsidian` marker directory or at
/// least one note file directly inside it.
pub fn is_valid_vault(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => {}
        _ => return false,
    }

    if path.join(VAULT_MARKER_DIR).is_dir() {
        return true;
    }

    let Ok(entries) = fs::read_dir(path) else {
        return false;
    };
    entries.flatten().any(|entry| {
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(true);
        !is_dir && Path::new(&entry.file_name()).extension() == Some(OsStr::new(NOTE_EXTENSION))
    })
}
