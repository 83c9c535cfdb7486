//! Remote synchronization
//!
//! A fire-and-forget background fetch, an on-demand ahead/behind report, and an
//! explicit stash / pull --rebase / stash pop transaction. Every git invocation
//! goes through [`GitBackend`] and is scoped to the vault directory.

pub mod backend;
pub mod coordinator;

pub use backend::{GitBackend, ProcessGit, StashOutcome};
pub use coordinator::SyncCoordinator;
