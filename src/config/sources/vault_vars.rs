//! Conventional vault variables: TIPS_VAULT and OBSIDIAN_VAULT.
//!
//! These take precedence over every other layer. Empty values are ignored.

use super::EnvMap;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};

const VAULT_VARS: [(&str, &str); 2] = [("TIPS_VAULT", "vault.tips"), ("OBSIDIAN_VAULT", "vault.obsidian")];

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    env: &EnvMap,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let mut builder = builder;
    for (var, key) in VAULT_VARS {
        let value = env.get(var).filter(|v| !v.is_empty()).cloned();
        builder = builder.set_override_option(key, value)?;
    }
    Ok(builder)
}
