//! CLI Tooling
//!
//! Command-line interface for vaultpick. Each invocation runs exactly one entry
//! point: an interactive session (default), listing, git status, or sync.

use crate::config::VaultpickConfig;
use crate::editor::ProcessEditor;
use crate::error::ApiError;
use crate::format::{format_listing_json, format_listing_text};
use crate::selection::{FzfSelector, SelectionArbiter};
use crate::session::{SessionOrchestrator, SessionOutcome};
use crate::sync::{ProcessGit, SyncCoordinator};
use crate::types::VaultKind;
use crate::vault::VaultLocator;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::info;

/// vaultpick - open or create notes in your vault
#[derive(Debug, Parser)]
#[command(name = "vaultpick", version)]
#[command(about = "Fast note picker with recency ranking and background git sync")]
#[command(after_help = "Examples:
  vaultpick                    # Interactive file selection
  vaultpick notes/daily.md     # Open (or create) a specific file
  vaultpick project            # Search, seeded with \"project\"
  vaultpick --mode tips        # Use the tips vault
  vaultpick --list             # List all notes, most recent first
  vaultpick --status           # Show git status of the vault
  vaultpick --sync             # Stash, pull --rebase, stash pop")]
pub struct Cli {
    /// Note path to open directly, or a search term to seed the selector
    pub target: Option<String>,

    /// Vault kind to use
    #[arg(short, long, value_enum, default_value_t = Mode::Auto)]
    pub mode: Mode,

    /// List all notes, most recently modified first
    #[arg(short, long, conflicts_with_all = ["status", "sync"])]
    pub list: bool,

    /// Print the listing as JSON (with --list)
    #[arg(long, requires = "list")]
    pub json: bool,

    /// Show git status of the vault
    #[arg(short, long, conflicts_with = "sync")]
    pub status: bool,

    /// Sync with remote (stash, pull --rebase, stash pop)
    #[arg(long)]
    pub sync: bool,

    /// Enable debug output on stderr
    #[arg(short, long)]
    pub debug: bool,

    /// Configuration file path (replaces the global config file)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Vault kind selection on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Tips,
    Obsidian,
    /// `tips` when the invoked path contains "tips", else `obsidian`
    Auto,
}

impl Mode {
    /// Concrete vault kind, using `program` (argv[0] as invoked) to settle
    /// `auto`. The whole path counts, so a `tips` link or directory selects tips.
    pub fn resolve(self, program: &str) -> VaultKind {
        match self {
            Mode::Tips => VaultKind::Tips,
            Mode::Obsidian => VaultKind::Obsidian,
            Mode::Auto if program.contains("tips") => VaultKind::Tips,
            Mode::Auto => VaultKind::Obsidian,
        }
    }
}

/// The single entry point selected by the flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Interactive { target: String },
    List { json: bool },
    Status,
    Sync,
}

impl Cli {
    pub fn action(&self) -> Action {
        if self.list {
            Action::List { json: self.json }
        } else if self.status {
            Action::Status
        } else if self.sync {
            Action::Sync
        } else {
            Action::Interactive {
                target: self.target.clone().unwrap_or_default(),
            }
        }
    }
}

/// CLI execution context
pub struct CliContext {
    session: SessionOrchestrator,
}

impl CliContext {
    /// Resolve the vault and assemble the process-backed collaborators.
    pub fn new(
        kind: VaultKind,
        config: &VaultpickConfig,
        runtime: Handle,
    ) -> Result<Self, ApiError> {
        let locator = VaultLocator::for_current_user(config.vault.clone())?;
        let vault = locator.resolve(kind)?;
        info!(kind = %vault.kind(), root = %vault.root().display(), "Resolved vault");

        let root = vault.root().to_path_buf();
        let sync = SyncCoordinator::new(Arc::new(ProcessGit::new(root.clone())), runtime)
            .with_fetch_timeout(Duration::from_secs(config.sync.fetch_timeout_secs));
        let arbiter = SelectionArbiter::new(Box::new(FzfSelector::new(config.selector.clone())));
        let editor = Box::new(ProcessEditor::new(root, config.editor.clone()));

        Ok(Self::from_session(SessionOrchestrator::new(
            vault, sync, arbiter, editor,
        )))
    }

    pub fn from_session(session: SessionOrchestrator) -> Self {
        Self { session }
    }

    /// Execute an action, returning text for stdout (possibly empty).
    pub fn execute(&self, action: &Action) -> Result<String, ApiError> {
        match action {
            Action::Interactive { target } => {
                let outcome = self.session.run_interactive(target)?;
                if outcome == SessionOutcome::Cancelled {
                    info!("No file selected");
                }
                // Session output goes straight to the terminal.
                Ok(String::new())
            }
            Action::List { json } => {
                let list = self.session.list_files()?;
                if *json {
                    format_listing_json(&list).map_err(|e| {
                        ApiError::ConfigError(format!("Failed to serialize listing: {}", e))
                    })
                } else {
                    Ok(format_listing_text(&list))
                }
            }
            Action::Status => self.session.show_status(),
            Action::Sync => {
                self.session.sync()?;
                Ok("Sync complete".to_string())
            }
        }
    }
}
