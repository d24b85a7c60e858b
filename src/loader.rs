//! JSON source loading.
//!
//! The loader is the single "read every JSON file under a path" primitive used by
//! all aggregators. It never logs parse failures itself: they come back as
//! [`LoadWarning`] values next to the documents that did parse, and the caller
//! decides how to report them.
//!
//! Every read goes through a [`SourceCache`] owned by the run, so a file that two
//! aggregators look at (tokens and supporters, for example) is read and parsed
//! exactly once and both see the same content.

use crate::document::RawDocument;
use crate::error::BuildError;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

const JSON_EXTENSION: &str = "json";

/// A source file that could not be used. Recoverable: the file is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LoadWarning {
    pub path: PathBuf,
    pub message: String,
}

impl LoadWarning {
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to parse {}: {}", self.path.display(), self.message)
    }
}

/// Outcome of reading one optional JSON file.
#[derive(Debug, Clone)]
pub enum JsonFile {
    Missing,
    Parsed(RawDocument),
    Malformed(LoadWarning),
}

/// Documents found under a directory, in traversal order, plus the files that failed.
#[derive(Debug, Clone, Default)]
pub struct LoadedDocuments {
    pub documents: Vec<RawDocument>,
    pub warnings: Vec<LoadWarning>,
}

/// Immediate subdirectory of a per-chain domain root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainDir {
    pub chain_id: u64,
    pub path: PathBuf,
}

/// Per-run memo of parsed source files.
#[derive(Debug, Default)]
pub struct SourceCache {
    files: Mutex<HashMap<PathBuf, JsonFile>>,
}

impl SourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct files read so far.
    pub fn files_read(&self) -> usize {
        self.files.lock().len()
    }

    /// Read and parse one file, or return the outcome of an earlier read.
    ///
    /// A file that does not exist is `Missing`; malformed JSON is `Malformed`.
    /// Any other I/O failure is fatal.
    pub fn read_json(&self, path: &Path) -> Result<JsonFile, BuildError> {
        let mut files = self.files.lock();
        if let Some(cached) = files.get(path) {
            trace!(path = %path.display(), "Source cache hit");
            return Ok(cached.clone());
        }

        let outcome = match fs::read(path) {
            Ok(bytes) => match serde_json::from_slice::<RawDocument>(&bytes) {
                Ok(value) => JsonFile::Parsed(value),
                Err(e) => JsonFile::Malformed(LoadWarning::new(path, e.to_string())),
            },
            Err(e) if e.kind() == ErrorKind::NotFound => JsonFile::Missing,
            Err(e) => return Err(BuildError::io(path, e)),
        };

        files.insert(path.to_path_buf(), outcome.clone());
        Ok(outcome)
    }

    /// Load every `*.json` file at any depth under `root`.
    ///
    /// A missing root yields an empty result. Entries are visited in file-name
    /// order at each level, which makes the returned order reproducible.
    pub fn load_tree(&self, root: &Path) -> Result<LoadedDocuments, BuildError> {
        let files = json_files(root, None)?;
        let mut loaded = LoadedDocuments::default();

        for path in files {
            match self.read_json(&path)? {
                JsonFile::Parsed(doc) => loaded.documents.push(doc),
                JsonFile::Malformed(warning) => loaded.warnings.push(warning),
                JsonFile::Missing => {}
            }
        }

        debug!(
            root = %root.display(),
            documents = loaded.documents.len(),
            warnings = loaded.warnings.len(),
            "Loaded JSON tree"
        );
        Ok(loaded)
    }
}

/// Paths of `*.json` files under `root`, sorted by file name at each level.
///
/// `max_depth` of `Some(1)` lists only the immediate children.
pub fn json_files(root: &Path, max_depth: Option<usize>) -> Result<Vec<PathBuf>, BuildError> {
    if !root.exists() {
        return Ok(Vec::new());
    }

    let walker = WalkDir::new(root)
        .follow_links(false)
        .min_depth(1)
        .max_depth(max_depth.unwrap_or(usize::MAX))
        .sort_by_file_name();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| BuildError::Walk {
            path: root.to_path_buf(),
            source: e,
        })?;
        // Linked files are read; linked directories are never entered.
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if is_file && has_json_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Immediate subdirectories of `root` named by a chain id, ascending by id.
pub fn chain_dirs(root: &Path) -> Result<Vec<ChainDir>, BuildError> {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(BuildError::io(root, e)),
    };

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| BuildError::io(root, e))?;
        let file_type = entry.file_type().map_err(|e| BuildError::io(entry.path(), e))?;
        if !file_type.is_dir() {
            continue;
        }
        let name = entry.file_name();
        match name.to_str().and_then(parse_chain_id) {
            Some(chain_id) => dirs.push(ChainDir {
                chain_id,
                path: entry.path(),
            }),
            None => debug!(dir = %entry.path().display(), "Skipping non-chain directory"),
        }
    }

    dirs.sort_by_key(|dir| dir.chain_id);
    Ok(dirs)
}

/// Parse a directory name as a chain id. Only the canonical decimal form counts.
pub fn parse_chain_id(name: &str) -> Option<u64> {
    name.parse::<u64>()
        .ok()
        .filter(|id| id.to_string() == name)
}

fn has_json_extension(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(JSON_EXTENSION)
}
