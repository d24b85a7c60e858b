//! CLI route: run context built from the input root and config, dispatching
//! to the pipeline and presentation.

use crate::cli::parse::Cli;
use crate::cli::presentation::{format_summary_json, format_summary_text};
use crate::config::{ConfigLoader, MetadistConfig};
use crate::error::BuildError;
use crate::pipeline::Pipeline;
use std::path::PathBuf;
use tracing::debug;

/// Runtime context for CLI execution: input root and loaded configuration.
pub struct RunContext {
    root: PathBuf,
    config: MetadistConfig,
}

impl RunContext {
    /// Load and validate config for `root`. An explicit `config_path` replaces
    /// the `<root>/metadist.toml` lookup.
    pub fn new(root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, BuildError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&root)?,
        };

        config.validate().map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            BuildError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                messages.join("\n")
            ))
        })?;

        Ok(Self { root, config })
    }

    /// Run the build and render its summary.
    pub fn execute(&self, cli: &Cli) -> Result<String, BuildError> {
        if cli.format != "text" && cli.format != "json" {
            return Err(BuildError::ConfigError(format!(
                "Invalid format: {} (must be 'text' or 'json')",
                cli.format
            )));
        }

        let mut config = self.config.clone();
        if let Some(ref out) = cli.out {
            // --out is relative to the working directory, not the input root.
            config.paths.output_dir = if out.is_absolute() {
                out.clone()
            } else {
                std::env::current_dir()
                    .map_err(|e| BuildError::io(out, e))?
                    .join(out)
            };
        }
        debug!(output_dir = %config.paths.output_dir.display(), "Resolved output directory");

        let summary = Pipeline::from_config(&self.root, &config).run()?;

        if cli.format == "json" {
            format_summary_json(&summary)
        } else {
            Ok(format_summary_text(&summary))
        }
    }
}
