//! Global config file: $XDG_CONFIG_HOME/vaultpick/config.toml (optional)

use super::EnvMap;
use crate::config::xdg;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};

/// Add the global config file when a config home can be determined.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    env: &EnvMap,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let lookup = |key: &str| env.get(key).cloned();
    let Some(path) = xdg::global_config_path(lookup) else {
        return Ok(builder);
    };
    Ok(builder.add_source(
        File::from(path.as_path())
            .format(FileFormat::Toml)
            .required(false),
    ))
}
