//! Configuration System
//!
//! Layered configuration for a build run: built-in defaults, then an optional
//! `metadist.toml` at the input root, then `METADIST_*` environment variables.
//! An explicit config file replaces the root file lookup.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge_policy;
mod sources;

pub use facade::ConfigLoader;
pub use sources::root_file::CONFIG_FILE_NAME;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadistConfig {
    /// Input and output locations, relative to the input root
    #[serde(default)]
    pub paths: PathsConfig,

    /// Build behaviour
    #[serde(default)]
    pub build: BuildSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where sources live and where the distribution is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_profiles_dir")]
    pub profiles_dir: PathBuf,

    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,

    /// JSON file whose `version` field stamps the manifest
    #[serde(default = "default_version_file")]
    pub version_file: PathBuf,
}

pub(crate) fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

pub(crate) fn default_output_dir() -> PathBuf {
    PathBuf::from("dist")
}

pub(crate) fn default_profiles_dir() -> PathBuf {
    PathBuf::from("profiles")
}

pub(crate) fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

pub(crate) fn default_version_file() -> PathBuf {
    PathBuf::from("package.json")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            output_dir: default_output_dir(),
            profiles_dir: default_profiles_dir(),
            assets_dir: default_assets_dir(),
            version_file: default_version_file(),
        }
    }
}

/// Build behaviour settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildSettings {
    /// Manifest version; when unset it is read from `paths.version_file`
    #[serde(default)]
    pub version: Option<String>,
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Paths(String, String),
    Build(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Paths(field, msg) => write!(f, "paths.{}: {}", field, msg),
            ValidationError::Build(msg) => write!(f, "build: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl PathsConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let fields = [
            ("data_dir", &self.data_dir),
            ("output_dir", &self.output_dir),
            ("profiles_dir", &self.profiles_dir),
            ("assets_dir", &self.assets_dir),
            ("version_file", &self.version_file),
        ];
        fields
            .into_iter()
            .filter(|(_, path)| path.as_os_str().is_empty())
            .map(|(field, _)| {
                ValidationError::Paths(field.to_string(), "cannot be empty".to_string())
            })
            .collect()
    }
}

impl MetadistConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = self.paths.validate();

        if let Some(version) = &self.build.version {
            if version.trim().is_empty() {
                errors.push(ValidationError::Build(
                    "version override cannot be blank".to_string(),
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
