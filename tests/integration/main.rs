//! Integration tests for vaultpick

mod cli_contracts;
mod session_flow;
mod support;
