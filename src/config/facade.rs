//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::VaultpickConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global file and the process environment.
    pub fn load() -> Result<VaultpickConfig, ConfigError> {
        MergeService::load(None)
    }

    /// Load configuration from a specific file (replaces the global file).
    pub fn load_from_file(path: &Path) -> Result<VaultpickConfig, ConfigError> {
        MergeService::load(Some(path))
    }

    /// Create default configuration.
    pub fn default() -> VaultpickConfig {
        VaultpickConfig::default()
    }
}
