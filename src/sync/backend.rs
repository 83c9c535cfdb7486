use crate::error::GitError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::time::Duration;
use tracing::debug;

/// Whether `git stash` recorded a new entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StashOutcome {
    Saved,
    NothingToSave,
}

/// Git operations consumed by the sync coordinator.
#[async_trait]
pub trait GitBackend: Send + Sync {
    /// Repository the backend operates on.
    fn repo_dir(&self) -> &Path;

    /// `git fetch --all --quiet`, stopped once `timeout` elapses.
    ///
    /// Dropping the future (runtime shutdown at exit) must leave the fetch
    /// running so it can finish warming refs for the next invocation.
    async fn fetch(&self, timeout: Duration) -> Result<(), GitError>;

    fn is_work_tree(&self) -> bool;

    /// `git status --short --porcelain`.
    fn status_short(&self) -> Result<String, GitError>;

    /// `git rev-list --count <range>`.
    fn rev_count(&self, range: &str) -> Result<u64, GitError>;

    fn stash(&self) -> Result<StashOutcome, GitError>;

    fn pull_rebase(&self) -> Result<(), GitError>;

    fn stash_pop(&self) -> Result<(), GitError>;
}

/// Backend that shells out to the `git` executable.
#[derive(Debug, Clone)]
pub struct ProcessGit {
    repo_dir: PathBuf,
    program: PathBuf,
}

impl ProcessGit {
    pub fn new(repo_dir: PathBuf) -> Self {
        Self {
            repo_dir,
            program: PathBuf::from("git"),
        }
    }

    /// Use `program` instead of the `git` found on PATH.
    pub fn with_program(mut self, program: PathBuf) -> Self {
        self.program = program;
        self
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args).current_dir(&self.repo_dir);
        cmd
    }

    /// Run with captured output; non-zero exit is an error.
    fn capture(&self, args: &[&str]) -> Result<Output, GitError> {
        let output = self
            .command(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| GitError::Spawn {
                command: args.join(" "),
                source,
            })?;
        if !output.status.success() {
            return Err(GitError::Exit {
                command: args.join(" "),
                status: output.status.to_string(),
            });
        }
        Ok(output)
    }

    /// Run attached to the terminal so the user sees git's own progress and
    /// conflict messages.
    fn run_inherited(&self, args: &[&str]) -> Result<(), GitError> {
        debug!(command = %args.join(" "), "Running git");
        let status = self
            .command(args)
            .status()
            .map_err(|source| GitError::Spawn {
                command: args.join(" "),
                source,
            })?;
        if !status.success() {
            return Err(GitError::Exit {
                command: args.join(" "),
                status: status.to_string(),
            });
        }
        Ok(())
    }

    fn stash_head(&self) -> Option<String> {
        self.capture(&["rev-parse", "-q", "--verify", "refs/stash"])
            .ok()
            .map(|out| String::from_utf8_lossy(&out.stdout).trim().to_string())
    }
}

#[async_trait]
impl GitBackend for ProcessGit {
    fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    async fn fetch(&self, timeout: Duration) -> Result<(), GitError> {
        let args = ["fetch", "--all", "--quiet"];
        let command = args.join(" ");
        let mut child = tokio::process::Command::new(&self.program)
            .args(args)
            .current_dir(&self.repo_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| GitError::Spawn {
                command: command.clone(),
                source,
            })?;

        let status = match tokio::time::timeout(timeout, child.wait()).await {
            Ok(waited) => waited.map_err(|source| GitError::Spawn {
                command: command.clone(),
                source,
            })?,
            Err(_) => {
                if let Err(err) = child.kill().await {
                    debug!(error = %err, "Failed to stop timed out fetch");
                }
                return Err(GitError::TimedOut {
                    command,
                    after_secs: timeout.as_secs(),
                });
            }
        };
        if !status.success() {
            return Err(GitError::Exit {
                command,
                status: status.to_string(),
            });
        }
        Ok(())
    }

    fn is_work_tree(&self) -> bool {
        self.capture(&["rev-parse", "--is-inside-work-tree"])
            .map(|out| String::from_utf8_lossy(&out.stdout).trim() == "true")
            .unwrap_or(false)
    }

    fn status_short(&self) -> Result<String, GitError> {
        let output = self.capture(&["status", "--short", "--porcelain"])?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn rev_count(&self, range: &str) -> Result<u64, GitError> {
        let output = self.capture(&["rev-list", "--count", range])?;
        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        text.parse().map_err(|_| GitError::Parse {
            command: format!("rev-list --count {range}"),
            output: text,
        })
    }

    fn stash(&self) -> Result<StashOutcome, GitError> {
        let before = self.stash_head();
        self.run_inherited(&["stash"])?;
        let after = self.stash_head();
        if after.is_some() && after != before {
            Ok(StashOutcome::Saved)
        } else {
            Ok(StashOutcome::NothingToSave)
        }
    }

    fn pull_rebase(&self) -> Result<(), GitError> {
        self.run_inherited(&["pull", "--rebase"])
    }

    fn stash_pop(&self) -> Result<(), GitError> {
        self.run_inherited(&["stash", "pop"])
    }
}
