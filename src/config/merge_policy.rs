//! Merge rules: defaults first, later sources override earlier ones key by key.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Create a Config builder with the built-in defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("paths.data_dir", "data")?
        .set_default("paths.output_dir", "dist")?
        .set_default("paths.profiles_dir", "profiles")?
        .set_default("paths.assets_dir", "assets")?
        .set_default("paths.version_file", "package.json")
}
