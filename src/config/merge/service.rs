//! MergeService: orchestrates sources, applies merge policy, deserializes to VaultpickConfig.

use crate::config::sources::{self, environment, global_file, vault_vars, EnvMap};
use crate::config::VaultpickConfig;
use config::{ConfigError, File, FileFormat};
use std::path::Path;

use super::merge_policy;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config against the live process environment.
    pub fn load(explicit_file: Option<&Path>) -> Result<VaultpickConfig, ConfigError> {
        Self::load_with_env(explicit_file, &sources::process_env())
    }

    /// Load config against an environment snapshot.
    ///
    /// Precedence: global file or `explicit_file` (lowest) -> `VAULTPICK_*`
    /// environment -> `TIPS_VAULT` / `OBSIDIAN_VAULT` (highest).
    pub fn load_with_env(
        explicit_file: Option<&Path>,
        env: &EnvMap,
    ) -> Result<VaultpickConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = match explicit_file {
            Some(path) => builder.add_source(File::from(path).format(FileFormat::Toml)),
            None => global_file::add_to_builder(builder, env)?,
        };
        let builder = environment::add_to_builder(builder, env)?;
        let builder = vault_vars::add_to_builder(builder, env)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
