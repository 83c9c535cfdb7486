//! Editor handoff
//!
//! Opens a note in an interactive editor attached to the current terminal.

use crate::config::EditorConfig;
use crate::error::ApiError;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::info;

/// Opens a vault-relative path in an editor.
pub trait EditorLauncher {
    fn open_file(&self, relative_path: &Path) -> Result<(), ApiError>;
}

/// [`EditorLauncher`] that runs an external program with the vault as its
/// working directory.
#[derive(Debug, Clone)]
pub struct ProcessEditor {
    vault_root: PathBuf,
    config: EditorConfig,
    env_editor: Option<String>,
}

impl ProcessEditor {
    /// Editor for `vault_root`, consulting `$EDITOR` from the process environment.
    pub fn new(vault_root: PathBuf, config: EditorConfig) -> Self {
        let env_editor = std::env::var("EDITOR").ok();
        Self::with_env_editor(vault_root, config, env_editor)
    }

    pub fn with_env_editor(
        vault_root: PathBuf,
        config: EditorConfig,
        env_editor: Option<String>,
    ) -> Self {
        Self {
            vault_root,
            config,
            env_editor,
        }
    }

    /// Editor command line: configured command, then `$EDITOR`, then the first
    /// fallback found on PATH. The command may carry arguments (`code -w`).
    pub fn resolve_command(&self) -> Result<Vec<String>, ApiError> {
        let explicit = self
            .config
            .command
            .as_deref()
            .or(self.env_editor.as_deref())
            .map(str::trim)
            .filter(|cmd| !cmd.is_empty());

        if let Some(cmd) = explicit {
            return Ok(cmd.split_whitespace().map(str::to_string).collect());
        }

        self.config
            .fallbacks
            .iter()
            .find(|candidate| which::which(candidate.as_str()).is_ok())
            .map(|found| vec![found.clone()])
            .ok_or_else(|| {
                ApiError::EditorFailed(format!(
                    "no editor found. Please set $EDITOR or install one of: {}",
                    self.config.fallbacks.join(", ")
                ))
            })
    }
}

impl EditorLauncher for ProcessEditor {
    fn open_file(&self, relative_path: &Path) -> Result<(), ApiError> {
        let command = self.resolve_command()?;
        let (program, args) = command
            .split_first()
            .ok_or_else(|| ApiError::EditorFailed("empty editor command".to_string()))?;

        info!(editor = %program, path = %relative_path.display(), "Opening note");
        let status = Command::new(program)
            .args(args)
            .arg(relative_path)
            .current_dir(&self.vault_root)
            .status()
            .map_err(|e| ApiError::EditorFailed(format!("failed to start {}: {}", program, e)))?;

        if !status.success() {
            return Err(ApiError::EditorFailed(format!(
                "{} exited with {}",
                program, status
            )));
        }
        Ok(())
    }
}
