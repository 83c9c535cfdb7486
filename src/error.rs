//! Error types
//!
//! A single `ApiError` covers every failing step of a session. Each variant names
//! the step that broke so the CLI can print a message the user can act on.

use crate::types::VaultKind;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Step of the stash / pull --rebase / stash pop transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStep {
    Stash,
    PullRebase,
    StashPop,
}

impl fmt::Display for SyncStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncStep::Stash => "git stash",
            SyncStep::PullRebase => "git pull --rebase",
            SyncStep::StashPop => "git stash pop",
        };
        f.write_str(name)
    }
}

/// Failure of a single git invocation.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("failed to run git {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {command} exited with {status}")]
    Exit { command: String, status: String },

    #[error("git {command} timed out after {after_secs}s")]
    TimedOut { command: String, after_secs: u64 },

    #[error("unexpected output from git {command}: {output:?}")]
    Parse { command: String, output: String },
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid {kind} vault override: {} (not a directory with notes or a .obsidian folder)", .path.display())]
    InvalidOverride { kind: VaultKind, path: PathBuf },

    #[error("failed to list notes in {}: {source}", .root.display())]
    ListingFailed {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file selection failed: {0}")]
    ArbitrationFailed(String),

    #[error("failed to create {}: {reason}", .path.display())]
    MaterializationFailed { path: PathBuf, reason: String },

    #[error("{step} failed: {source}")]
    SyncTransactionFailed {
        step: SyncStep,
        #[source]
        source: GitError,
    },

    #[error(transparent)]
    GitFailed(#[from] GitError),

    #[error("{} is not inside a git work tree", .0.display())]
    NotARepository(PathBuf),

    #[error("editor failed: {0}")]
    EditorFailed(String),

    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
