//! Vaultpick: Recency-Ranked Note Selection
//!
//! Locates a notes vault, ranks its Markdown files by modification time, hands the
//! list to a fuzzy selector and opens the chosen (or newly created) note in an
//! editor. A background `git fetch` keeps the vault's view of its remote fresh
//! while the user is choosing.

pub mod config;
pub mod editor;
pub mod error;
pub mod format;
pub mod logging;
pub mod ranking;
pub mod selection;
pub mod session;
pub mod sync;
pub mod tooling;
pub mod types;
pub mod vault;
