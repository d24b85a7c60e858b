//! Error types for the metadata distribution build.
//!
//! Only fatal conditions live here. A source file that fails to parse is not an
//! error: it becomes a [`crate::loader::LoadWarning`] and the run continues.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal build errors. Any of these aborts the run before the manifest is written.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk directory {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid version descriptor {path}: {reason}")]
    VersionDescriptor { path: PathBuf, reason: String },

    #[error("Refusing to clear output directory {output}: it overlaps source directory {root}")]
    UnsafeOutputDir { output: PathBuf, root: PathBuf },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl BuildError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BuildError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<config::ConfigError> for BuildError {
    fn from(err: config::ConfigError) -> Self {
        BuildError::ConfigError(err.to_string())
    }
}
