//! Environment variable source: VAULTPICK_* prefix with __ separator

use super::EnvMap;
use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// `VAULTPICK_EDITOR__COMMAND=hx` sets `editor.command`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    env: &EnvMap,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("VAULTPICK")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(Some(env.clone())),
    );
    Ok(builder)
}
