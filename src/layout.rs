//! Resolved input and output locations for one build run.

use crate::aggregate::Domain;
use crate::config::PathsConfig;
use std::path::{Path, PathBuf};

/// Where the hand-authored sources live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLayout {
    pub root: PathBuf,
    pub data_dir: PathBuf,
    pub profiles_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub version_file: PathBuf,
}

impl SourceLayout {
    pub fn addresses_dir(&self) -> PathBuf {
        self.data_dir.join("addresses")
    }

    pub fn events_dir(&self) -> PathBuf {
        self.data_dir.join("events")
    }

    pub fn tokens_dir(&self) -> PathBuf {
        self.data_dir.join("tokens")
    }

    pub fn networks_file(&self) -> PathBuf {
        self.data_dir.join("networks.json")
    }

    pub fn apps_dir(&self) -> PathBuf {
        self.data_dir.join("apps")
    }

    pub fn orgs_dir(&self) -> PathBuf {
        self.data_dir.join("orgs")
    }

    pub fn donations_file(&self) -> PathBuf {
        self.data_dir.join("donations.json")
    }
}

/// Where the distribution is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub root: PathBuf,
}

impl OutputLayout {
    /// Directory holding one file per chain, e.g. `dist/tokens`.
    pub fn domain_dir(&self, domain: Domain) -> PathBuf {
        self.root.join(domain.as_str())
    }

    /// Per-chain output file, e.g. `dist/tokens/1.json`.
    pub fn chain_file(&self, domain: Domain, chain_id: u64) -> PathBuf {
        self.domain_dir(domain).join(format!("{}.json", chain_id))
    }

    /// Single-file output, e.g. `dist/networks.json`.
    pub fn domain_file(&self, domain: Domain) -> PathBuf {
        self.root.join(format!("{}.json", domain.as_str()))
    }

    pub fn manifest_file(&self) -> PathBuf {
        self.root.join("manifest.json")
    }

    pub fn profiles_dir(&self) -> PathBuf {
        self.root.join("profiles")
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.root.join("assets")
    }
}

/// Immutable input/output configuration shared by every build step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLayout {
    pub source: SourceLayout,
    pub output: OutputLayout,
}

impl BuildLayout {
    /// Layout with the default directory names under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::from_paths(root, &PathsConfig::default())
    }

    /// Resolve configured paths against `root`. Absolute paths are kept as given.
    pub fn from_paths(root: impl Into<PathBuf>, paths: &PathsConfig) -> Self {
        let root = root.into();
        let resolve = |p: &Path| root.join(p);
        Self {
            source: SourceLayout {
                data_dir: resolve(&paths.data_dir),
                profiles_dir: resolve(&paths.profiles_dir),
                assets_dir: resolve(&paths.assets_dir),
                version_file: resolve(&paths.version_file),
                root: root.clone(),
            },
            output: OutputLayout {
                root: resolve(&paths.output_dir),
            },
        }
    }

    /// Replace the output root.
    pub fn with_output_dir(mut self, output_dir: impl AsRef<Path>) -> Self {
        self.output.root = self.source.root.join(output_dir);
        self
    }
}
