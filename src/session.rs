//! Session orchestration
//!
//! Wires vault, ranking, selection, sync and editor handoff into one interactive
//! session:
//!
//! ```text
//! Start -> DirectOpen                                   (argument looks like a path)
//! Start -> Listing -> Arbitrating -> Cancelled
//!                                 -> Materializing -> Handoff
//! ```
//!
//! The only concurrency is the background fetch started before listing; every
//! other step runs in order on the calling thread.

use crate::editor::EditorLauncher;
use crate::error::ApiError;
use crate::format::format_sync_advisory;
use crate::ranking::FileRanker;
use crate::selection::{is_direct_path, SelectionArbiter};
use crate::sync::SyncCoordinator;
use crate::types::{RankedList, Selection, SyncStatus, Vault};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Component, Path};
use tracing::{debug, info};

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The argument was a path and was opened without listing or fetching.
    DirectOpen { path: String, created: bool },
    /// The user backed out of selection. Nothing was created or opened.
    Cancelled,
    /// A selected (or newly typed) note was opened.
    Opened { path: String, created: bool },
}

pub struct SessionOrchestrator {
    vault: Vault,
    ranker: FileRanker,
    sync: SyncCoordinator,
    arbiter: SelectionArbiter,
    editor: Box<dyn EditorLauncher>,
}

impl SessionOrchestrator {
    pub fn new(
        vault: Vault,
        sync: SyncCoordinator,
        arbiter: SelectionArbiter,
        editor: Box<dyn EditorLauncher>,
    ) -> Self {
        Self {
            vault,
            ranker: FileRanker::default(),
            sync,
            arbiter,
            editor,
        }
    }

    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    /// Run one interactive session for `target` (a path, a search term, or empty).
    pub fn run_interactive(&self, target: &str) -> Result<SessionOutcome, ApiError> {
        if is_direct_path(target) {
            debug!(target, "Direct open");
            let created = self.open(target)?;
            return Ok(SessionOutcome::DirectOpen {
                path: target.to_string(),
                created,
            });
        }

        // Detached: the handle is dropped and the fetch may outlive the session.
        drop(self.sync.fetch_async());

        let candidates = self.ranker.list(self.vault.root())?;
        let selection = self
            .arbiter
            .resolve(&candidates.display_paths(), target)?;

        // Advisory only; the fetch above may not have finished yet.
        if let Err(err) = self.print_sync_advisory() {
            debug!(error = %err, "Sync status check failed");
        }

        match selection {
            Selection::Cancelled => {
                info!("Selection cancelled");
                Ok(SessionOutcome::Cancelled)
            }
            Selection::Path(path) => {
                let created = self.open(&path)?;
                Ok(SessionOutcome::Opened { path, created })
            }
        }
    }

    /// Notes in the vault, most recently modified first.
    pub fn list_files(&self) -> Result<RankedList, ApiError> {
        self.ranker.list(self.vault.root())
    }

    /// Porcelain git status of the vault.
    pub fn show_status(&self) -> Result<String, ApiError> {
        self.sync.status()
    }

    /// Stash, rebase onto the upstream, restore.
    pub fn sync(&self) -> Result<(), ApiError> {
        self.sync.sync_with_remote()
    }

    fn print_sync_advisory(&self) -> Result<SyncStatus, ApiError> {
        let status = self.sync.sync_status()?;
        if let Some(text) = format_sync_advisory(&status) {
            println!("{}", text);
        }
        Ok(status)
    }

    fn open(&self, relative: &str) -> Result<bool, ApiError> {
        let created = materialize(self.vault.root(), relative)?;
        if created {
            println!("Creating new file: {}", relative);
        }
        self.editor.open_file(Path::new(relative))?;
        Ok(created)
    }
}

/// Create `root/relative` (and any missing parents) if it does not exist.
///
/// Returns whether a file was created. An existing file is never truncated, even
/// if it appears between the existence check and the create. `relative` must
/// stay inside `root`.
pub fn materialize(root: &Path, relative: &str) -> Result<bool, ApiError> {
    let rel = Path::new(relative);
    let escapes = rel
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if relative.trim().is_empty() || escapes {
        return Err(ApiError::MaterializationFailed {
            path: rel.to_path_buf(),
            reason: "path must be relative to the vault and stay inside it".to_string(),
        });
    }

    let full = root.join(rel);
    if full.exists() {
        return Ok(false);
    }

    let failed = |err: io::Error| ApiError::MaterializationFailed {
        path: full.clone(),
        reason: err.to_string(),
    };
    if let Some(parent) = full.parent() {
        fs::create_dir_all(parent).map_err(failed)?;
    }
    match OpenOptions::new().write(true).create_new(true).open(&full) {
        Ok(_) => {
            info!(path = %full.display(), "Created note");
            Ok(true)
        }
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(err) => Err(failed(err)),
    }
}
