use crate::config::SelectorConfig;
use crate::error::ApiError;
use crate::types::Selection;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use tracing::debug;

/// Interactive fuzzy selection over a list of candidates.
///
/// Implementations must keep three outcomes apart: the user cancelled
/// (`Ok(Selection::Cancelled)`), the tool could not run (`Err`), and the user
/// confirmed text that matches no candidate (`Ok(Selection::Path(text))`).
pub trait FuzzySelector {
    fn select_file(&self, candidates: &[String], query: &str) -> Result<Selection, ApiError>;
}

/// fzf exit code when nothing matched the query.
const FZF_NO_MATCH: i32 = 1;
/// fzf exit code on ESC / Ctrl-C.
const FZF_INTERRUPTED: i32 = 130;

/// [`FuzzySelector`] backed by the `fzf` executable.
#[derive(Debug, Clone)]
pub struct FzfSelector {
    config: SelectorConfig,
}

impl FzfSelector {
    pub fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    fn command(&self, query: &str) -> Command {
        let mut cmd = Command::new(&self.config.program);
        cmd.arg("--height").arg(&self.config.height);
        if self.config.border {
            cmd.arg("--border");
        }
        cmd.arg("--print-query");
        if !query.is_empty() {
            cmd.arg("--query").arg(query);
        }
        cmd
    }
}

impl FuzzySelector for FzfSelector {
    fn select_file(&self, candidates: &[String], query: &str) -> Result<Selection, ApiError> {
        let program = &self.config.program;
        let mut child = self
            .command(query)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|err| {
                if err.kind() == io::ErrorKind::NotFound {
                    ApiError::ArbitrationFailed(format!(
                        "{program} is not installed. Please install fzf: https://github.com/junegunn/fzf"
                    ))
                } else {
                    ApiError::ArbitrationFailed(format!("failed to start {program}: {err}"))
                }
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            let input = candidates.join("\n");
            // The user may accept before reading everything; a closed pipe is fine.
            if let Err(err) = stdin.write_all(input.as_bytes()) {
                if err.kind() != io::ErrorKind::BrokenPipe {
                    return Err(ApiError::ArbitrationFailed(format!(
                        "failed to send candidates to {program}: {err}"
                    )));
                }
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|err| ApiError::ArbitrationFailed(format!("{program} failed: {err}")))?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!(code = ?output.status.code(), "Selector exited");
        interpret_output(output.status.code(), &stdout)
    }
}

/// Map fzf's exit code and `--print-query` output to a selection.
///
/// With `--print-query` the first line is the typed query and the second, when
/// present, the chosen entry.
fn interpret_output(code: Option<i32>, stdout: &str) -> Result<Selection, ApiError> {
    // Only line terminators are stripped; typed text comes back untouched.
    let mut lines = stdout.split('\n').map(|line| line.trim_end_matches('\r'));
    let query = lines.next().unwrap_or_default();
    let picked = lines.find(|line| !line.is_empty());

    match code {
        Some(0) => Ok(Selection::from_raw(picked.unwrap_or(query))),
        Some(FZF_NO_MATCH) => Ok(Selection::from_raw(query)),
        Some(FZF_INTERRUPTED) => Ok(Selection::Cancelled),
        Some(code) => Err(ApiError::ArbitrationFailed(format!(
            "fzf exited with status {code}"
        ))),
        None => Err(ApiError::ArbitrationFailed(
            "fzf was terminated by a signal".to_string(),
        )),
    }
}
