use async_trait::async_trait;
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;
use tokio::runtime::Runtime;
use vaultpick::editor::EditorLauncher;
use vaultpick::error::{ApiError, GitError};
use vaultpick::selection::{FuzzySelector, SelectionArbiter};
use vaultpick::session::SessionOrchestrator;
use vaultpick::sync::{GitBackend, StashOutcome, SyncCoordinator};
use vaultpick::types::{Selection, Vault, VaultKind};

/// Git backend with fixed divergence that counts fetches and count queries.
#[derive(Default)]
pub struct CountingGit {
    pub fetches: AtomicUsize,
    pub count_queries: AtomicUsize,
    pub not_repo: bool,
    pub behind: u64,
    pub ahead: u64,
}

impl CountingGit {
    pub fn diverged(behind: u64, ahead: u64) -> Self {
        Self {
            behind,
            ahead,
            ..Default::default()
        }
    }

    pub fn outside_repository() -> Self {
        Self {
            not_repo: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl GitBackend for CountingGit {
    fn repo_dir(&self) -> &Path {
        Path::new("/vault")
    }

    async fn fetch(&self, _timeout: Duration) -> Result<(), GitError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn is_work_tree(&self) -> bool {
        !self.not_repo
    }

    fn status_short(&self) -> Result<String, GitError> {
        Ok(String::new())
    }

    fn rev_count(&self, range: &str) -> Result<u64, GitError> {
        self.count_queries.fetch_add(1, Ordering::SeqCst);
        if range.starts_with("HEAD..") {
            Ok(self.behind)
        } else {
            Ok(self.ahead)
        }
    }

    fn stash(&self) -> Result<StashOutcome, GitError> {
        Ok(StashOutcome::NothingToSave)
    }

    fn pull_rebase(&self) -> Result<(), GitError> {
        Ok(())
    }

    fn stash_pop(&self) -> Result<(), GitError> {
        Ok(())
    }
}

/// Selector that replays one answer and records what it was shown.
pub struct ScriptedSelector {
    answer: Selection,
    shown: Arc<Mutex<Vec<(Vec<String>, String)>>>,
}

impl FuzzySelector for ScriptedSelector {
    fn select_file(&self, candidates: &[String], query: &str) -> Result<Selection, ApiError> {
        self.shown
            .lock()
            .push((candidates.to_vec(), query.to_string()));
        Ok(self.answer.clone())
    }
}

/// Editor that records the paths it was asked to open.
pub struct RecordingEditor {
    opened: Arc<Mutex<Vec<PathBuf>>>,
}

impl EditorLauncher for RecordingEditor {
    fn open_file(&self, relative_path: &Path) -> Result<(), ApiError> {
        self.opened.lock().push(relative_path.to_path_buf());
        Ok(())
    }
}

/// A session over a temporary vault with scripted collaborators.
pub struct Harness {
    pub vault: TempDir,
    pub git: Arc<CountingGit>,
    pub shown: Arc<Mutex<Vec<(Vec<String>, String)>>>,
    pub opened: Arc<Mutex<Vec<PathBuf>>>,
    pub session: SessionOrchestrator,
    runtime: Runtime,
}

impl Harness {
    pub fn new(answer: Selection) -> Self {
        Self::with_git(answer, CountingGit::default())
    }

    pub fn with_git(answer: Selection, git: CountingGit) -> Self {
        let vault = TempDir::new().unwrap();
        let runtime = Runtime::new().unwrap();
        let git = Arc::new(git);
        let shown = Arc::new(Mutex::new(Vec::new()));
        let opened = Arc::new(Mutex::new(Vec::new()));

        let sync = SyncCoordinator::new(git.clone(), runtime.handle().clone());
        let arbiter = SelectionArbiter::new(Box::new(ScriptedSelector {
            answer,
            shown: Arc::clone(&shown),
        }));
        let editor = Box::new(RecordingEditor {
            opened: Arc::clone(&opened),
        });
        let session = SessionOrchestrator::new(
            Vault::new(vault.path().to_path_buf(), VaultKind::Obsidian),
            sync,
            arbiter,
            editor,
        );

        Self {
            vault,
            git,
            shown,
            opened,
            session,
            runtime,
        }
    }

    pub fn root(&self) -> &Path {
        self.vault.path()
    }

    /// Let the background fetch task run to completion.
    pub fn settle(&self) {
        self.runtime.block_on(async {
            tokio::time::sleep(Duration::from_millis(100)).await;
        });
    }

    pub fn fetch_count(&self) -> usize {
        self.git.fetches.load(Ordering::SeqCst)
    }

    pub fn count_queries(&self) -> usize {
        self.git.count_queries.load(Ordering::SeqCst)
    }
}

/// Write `relative` under `root` with a modification time `age` in the past.
pub fn write_aged(root: &Path, relative: &str, age: Duration) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, relative).unwrap();
    let file = fs::File::options().write(true).open(&path).unwrap();
    file.set_modified(SystemTime::now() - age).unwrap();
}
