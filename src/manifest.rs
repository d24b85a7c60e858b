//! Build manifest: version, build time and the per-domain counts.
//!
//! The manifest is the last file written. Its absence means the run aborted.

use crate::aggregate::Domain;
use crate::error::BuildError;
use crate::output::{timestamp_now, write_json};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildManifest {
    pub version: String,
    pub build_time: String,
    pub counts: ManifestCounts,
}

/// Item counts per domain, in manifest field order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestCounts {
    pub tokens: usize,
    pub networks: usize,
    pub apps: usize,
    pub organizations: usize,
    pub supporters: usize,
    pub donations: usize,
    pub events: usize,
    pub addresses: usize,
}

impl ManifestCounts {
    fn slot(&mut self, domain: Domain) -> &mut usize {
        match domain {
            Domain::Tokens => &mut self.tokens,
            Domain::Networks => &mut self.networks,
            Domain::Apps => &mut self.apps,
            Domain::Organizations => &mut self.organizations,
            Domain::Supporters => &mut self.supporters,
            Domain::Donations => &mut self.donations,
            Domain::Events => &mut self.events,
            Domain::Addresses => &mut self.addresses,
        }
    }

    pub fn record(&mut self, domain: Domain, count: usize) {
        *self.slot(domain) += count;
    }

    pub fn get(&self, domain: Domain) -> usize {
        match domain {
            Domain::Tokens => self.tokens,
            Domain::Networks => self.networks,
            Domain::Apps => self.apps,
            Domain::Organizations => self.organizations,
            Domain::Supporters => self.supporters,
            Domain::Donations => self.donations,
            Domain::Events => self.events,
            Domain::Addresses => self.addresses,
        }
    }
}

impl BuildManifest {
    /// Manifest stamped with the current time.
    pub fn new(version: impl Into<String>, counts: ManifestCounts) -> Self {
        Self {
            version: version.into(),
            build_time: timestamp_now(),
            counts,
        }
    }

    pub fn write(&self, path: &Path) -> Result<(), BuildError> {
        write_json(path, self)
    }
}

/// Read the `version` string from a JSON version descriptor such as `package.json`.
pub fn read_version(path: &Path) -> Result<String, BuildError> {
    let bytes = fs::read(path).map_err(|e| BuildError::io(path, e))?;
    let descriptor: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|e| BuildError::VersionDescriptor {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    descriptor
        .get("version")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| BuildError::VersionDescriptor {
            path: path.to_path_buf(),
            reason: "missing string field `version`".to_string(),
        })
}
