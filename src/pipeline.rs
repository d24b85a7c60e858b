//! Build orchestration.
//!
//! A run resolves the manifest version, wipes and recreates the output
//! directory, runs every build step in order against one shared source cache,
//! copies the static trees, and writes the manifest last. The first fatal error
//! stops the run; the manifest is then never written.

use crate::aggregate::{default_steps, BuildContext, BuildStep, Domain, StepReport};
use crate::config::MetadistConfig;
use crate::error::BuildError;
use crate::layout::BuildLayout;
use crate::loader::{LoadWarning, SourceCache};
use crate::manifest::{read_version, BuildManifest, ManifestCounts};
use crate::static_copy::{copy_tree, CopyReport};
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Outcome of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct BuildSummary {
    pub output_dir: PathBuf,
    pub steps: Vec<StepReport>,
    /// Distinct source files that could not be used, in the order first seen
    pub warnings: Vec<LoadWarning>,
    pub static_files: CopyReport,
    pub manifest: BuildManifest,
}

impl BuildSummary {
    pub fn count(&self, domain: Domain) -> usize {
        self.manifest.counts.get(domain)
    }
}

/// An ordered list of build steps over one input/output layout.
pub struct Pipeline {
    layout: BuildLayout,
    version: Option<String>,
    steps: Vec<Box<dyn BuildStep>>,
}

impl Pipeline {
    /// Pipeline with the standard steps.
    pub fn new(layout: BuildLayout) -> Self {
        Self {
            layout,
            version: None,
            steps: default_steps(),
        }
    }

    /// Pipeline for `root` with configured paths and version override.
    pub fn from_config(root: &Path, config: &MetadistConfig) -> Self {
        Self::new(BuildLayout::from_paths(root, &config.paths))
            .with_version(config.build.version.clone())
    }

    /// Stamp the manifest with `version` instead of reading the version file.
    pub fn with_version(mut self, version: Option<String>) -> Self {
        self.version = version;
        self
    }

    /// Replace the step list.
    pub fn with_steps(mut self, steps: Vec<Box<dyn BuildStep>>) -> Self {
        self.steps = steps;
        self
    }

    pub fn layout(&self) -> &BuildLayout {
        &self.layout
    }

    /// Run a full rebuild.
    #[instrument(skip(self), fields(root = %self.layout.source.root.display(), output = %self.layout.output.root.display()))]
    pub fn run(&self) -> Result<BuildSummary, BuildError> {
        let start = Instant::now();
        info!("Starting build");

        let version = self.resolve_version()?;
        self.prepare_output()?;

        let sources = SourceCache::new();
        let ctx = BuildContext::new(&self.layout, &sources);
        let mut counts = ManifestCounts::default();
        let mut reports = Vec::with_capacity(self.steps.len());
        let mut seen = HashSet::new();
        let mut warnings = Vec::new();

        for step in &self.steps {
            let report = step.run(&ctx)?;
            for warning in &report.warnings {
                if seen.insert(warning.clone()) {
                    warn!(
                        path = %warning.path.display(),
                        error = %warning.message,
                        "Skipping unparsable source file"
                    );
                    warnings.push(warning.clone());
                }
            }
            counts.record(report.domain, report.count);
            reports.push(report);
        }

        let static_files = self.copy_static()?;

        let manifest = BuildManifest::new(version, counts);
        manifest.write(&self.layout.output.manifest_file())?;

        info!(
            files_read = sources.files_read(),
            warnings = warnings.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Build complete"
        );

        Ok(BuildSummary {
            output_dir: self.layout.output.root.clone(),
            steps: reports,
            warnings,
            static_files,
            manifest,
        })
    }

    fn resolve_version(&self) -> Result<String, BuildError> {
        match &self.version {
            Some(version) => Ok(version.clone()),
            None => read_version(&self.layout.source.version_file),
        }
    }

    /// Remove and recreate the output directory.
    ///
    /// Refuses when the output directory contains the input root or any source
    /// tree, or lies inside a source tree (the static copy would recurse into it).
    fn prepare_output(&self) -> Result<(), BuildError> {
        let output = &self.layout.output.root;
        let output_canonical = canonicalize_lenient(output)?;
        let source = &self.layout.source;

        let protected_dirs = [
            (&source.root, false),
            (&source.data_dir, true),
            (&source.profiles_dir, true),
            (&source.assets_dir, true),
        ];
        for (protected, forbid_nested) in protected_dirs {
            if !protected.exists() {
                continue;
            }
            let canonical =
                dunce::canonicalize(protected).map_err(|e| BuildError::io(protected, e))?;
            let contains_source = canonical.starts_with(&output_canonical);
            let inside_source = forbid_nested && output_canonical.starts_with(&canonical);
            if contains_source || inside_source {
                return Err(BuildError::UnsafeOutputDir {
                    output: output.clone(),
                    root: protected.clone(),
                });
            }
        }

        if output.exists() {
            fs::remove_dir_all(output).map_err(|e| BuildError::io(output, e))?;
        }
        fs::create_dir_all(output).map_err(|e| BuildError::io(output, e))
    }

    fn copy_static(&self) -> Result<CopyReport, BuildError> {
        let source = &self.layout.source;
        let output = &self.layout.output;
        let mut total = CopyReport::default();

        for (name, src, dest) in [
            ("profiles", &source.profiles_dir, output.profiles_dir()),
            ("assets", &source.assets_dir, output.assets_dir()),
        ] {
            let copied = copy_tree(src, &dest)?;
            info!(files = copied.files, bytes = copied.bytes, "Copied {}/", name);
            total.files += copied.files;
            total.bytes += copied.bytes;
        }

        Ok(total)
    }
}

/// Canonical form of `path`, which need not exist yet: the nearest existing
/// ancestor is canonicalized and the missing tail appended.
fn canonicalize_lenient(path: &Path) -> Result<PathBuf, BuildError> {
    let mut existing = path;
    let mut tail = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name.to_os_string());
                existing = parent;
            }
            _ => break,
        }
    }

    let mut canonical = if existing.as_os_str().is_empty() {
        std::env::current_dir().map_err(|e| BuildError::io(path, e))?
    } else {
        dunce::canonicalize(existing).map_err(|e| BuildError::io(existing, e))?
    };
    for name in tail.into_iter().rev() {
        canonical.push(name);
    }
    Ok(canonical)
}
