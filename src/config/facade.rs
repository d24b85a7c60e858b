//! Config loading entry points used by the CLI.

use super::merge_policy::builder_with_defaults;
use super::sources::{environment, root_file};
use super::MetadistConfig;
use config::{ConfigError, File};
use std::path::Path;

/// Loads [`MetadistConfig`] from the layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, then `<root>/metadist.toml` if present, then the environment.
    pub fn load(root: &Path) -> Result<MetadistConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = root_file::add_to_builder(builder, root);
        let builder = environment::add_to_builder(builder);
        builder.build()?.try_deserialize()
    }

    /// Defaults, then the given file (which must exist), then the environment.
    pub fn load_from_file(path: &Path) -> Result<MetadistConfig, ConfigError> {
        let builder = builder_with_defaults()?.add_source(File::from(path).required(true));
        let builder = environment::add_to_builder(builder);
        builder.build()?.try_deserialize()
    }
}
