//! Tooling & Integration Layer
//!
//! Command-line surface over the session orchestrator.

pub mod cli;

pub use cli::{Action, Cli, CliContext, Mode};
