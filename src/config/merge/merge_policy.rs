//! Builder seeded with the defaults every layer merges onto.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder with defaults for scalar keys that environment layers commonly touch.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("sync.fetch_timeout_secs", 30)?
        .set_default("selector.program", "fzf")?
        .set_default("selector.height", "40%")?
        .set_default("selector.border", true)
}
