use super::backend::{GitBackend, StashOutcome};
use crate::error::{ApiError, SyncStep};
use crate::types::SyncStatus;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Default bound for the background fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Coordinates remote synchronization for one vault.
pub struct SyncCoordinator {
    backend: Arc<dyn GitBackend>,
    runtime: Handle,
    fetch_timeout: Duration,
}

impl SyncCoordinator {
    pub fn new(backend: Arc<dyn GitBackend>, runtime: Handle) -> Self {
        Self {
            backend,
            runtime,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Start a background fetch and return immediately.
    ///
    /// The outcome is only logged. Callers are expected to drop the handle; a
    /// status read taken before the fetch finishes may be stale. The backend
    /// stops the fetch when the timeout elapses. A fetch still running when the
    /// runtime shuts down keeps going and warms the next invocation's status.
    pub fn fetch_async(&self) -> JoinHandle<()> {
        let backend = Arc::clone(&self.backend);
        let timeout = self.fetch_timeout;
        self.runtime.spawn(async move {
            match backend.fetch(timeout).await {
                Ok(()) => debug!("Background fetch completed"),
                Err(err) => debug!(error = %err, "Background fetch failed"),
            }
        })
    }

    /// Ahead/behind counts against the configured upstream.
    ///
    /// Each count falls back to zero when it cannot be computed, for example
    /// when no upstream is configured. Only a vault outside any git work tree is
    /// reported as an error.
    pub fn sync_status(&self) -> Result<SyncStatus, ApiError> {
        if !self.backend.is_work_tree() {
            return Err(ApiError::NotARepository(
                self.backend.repo_dir().to_path_buf(),
            ));
        }
        let behind = self.count_or_zero("HEAD..@{upstream}");
        let ahead = self.count_or_zero("@{upstream}..HEAD");
        Ok(SyncStatus { behind, ahead })
    }

    fn count_or_zero(&self, range: &str) -> u64 {
        self.backend.rev_count(range).unwrap_or_else(|err| {
            debug!(range, error = %err, "Divergence count unavailable, assuming zero");
            0
        })
    }

    /// Short porcelain status of the vault.
    pub fn status(&self) -> Result<String, ApiError> {
        Ok(self.backend.status_short()?)
    }

    /// Stash local changes, rebase onto the upstream, then restore the stash.
    ///
    /// A failed pull still attempts to restore the stash before reporting the
    /// pull error. A failed restore after a successful pull is reported as-is;
    /// the working tree may need manual attention.
    pub fn sync_with_remote(&self) -> Result<(), ApiError> {
        let stashed = self
            .backend
            .stash()
            .map_err(|source| ApiError::SyncTransactionFailed {
                step: SyncStep::Stash,
                source,
            })?;
        info!(?stashed, "Stash step finished");

        if let Err(source) = self.backend.pull_rebase() {
            if stashed == StashOutcome::Saved {
                // Best effort; the pull error is what gets reported.
                let _ = self.backend.stash_pop();
            }
            warn!(error = %source, "Pull with rebase failed");
            return Err(ApiError::SyncTransactionFailed {
                step: SyncStep::PullRebase,
                source,
            });
        }

        if stashed == StashOutcome::Saved {
            self.backend
                .stash_pop()
                .map_err(|source| ApiError::SyncTransactionFailed {
                    step: SyncStep::StashPop,
                    source,
                })?;
        }
        info!("Vault synchronized with remote");
        Ok(())
    }
}
