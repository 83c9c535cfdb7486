//! Configuration sources, each adding one layer to the builder.

pub mod environment;
pub mod global_file;
pub mod vault_vars;

use std::collections::HashMap;

/// Snapshot of environment variables consulted while loading configuration.
pub type EnvMap = HashMap<String, String>;

/// Capture the current process environment.
pub fn process_env() -> EnvMap {
    std::env::vars().collect()
}
