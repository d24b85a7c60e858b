//! Root config file source: `<root>/metadist.toml`.

use config::builder::DefaultState;
use config::{ConfigBuilder, File};
use std::path::Path;
use tracing::debug;

/// File name looked up at the input root.
pub const CONFIG_FILE_NAME: &str = "metadist.toml";

/// Add the root config file to the builder when it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    root: &Path,
) -> ConfigBuilder<DefaultState> {
    let path = root.join(CONFIG_FILE_NAME);
    if path.is_file() {
        debug!(config_path = %path.display(), "Using root config file");
        builder.add_source(File::from(path.as_path()).required(false))
    } else {
        builder
    }
}
