//! Output document shapes and the JSON writer.
//!
//! All outputs are pretty-printed with two-space indentation. Files are written
//! to a `.tmp` sibling and renamed into place so a reader never sees a
//! half-written document.

use crate::error::BuildError;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Current time as RFC 3339 UTC with milliseconds, e.g. `2025-01-01T00:00:00.000Z`.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `{chainId?, updatedAt, count, <items_key>: [...]}`
pub fn listing_document(chain_id: Option<u64>, items_key: &str, items: Vec<Value>) -> Value {
    let mut doc = Map::new();
    if let Some(chain_id) = chain_id {
        doc.insert("chainId".to_string(), Value::from(chain_id));
    }
    doc.insert("updatedAt".to_string(), Value::from(timestamp_now()));
    doc.insert("count".to_string(), Value::from(items.len()));
    doc.insert(items_key.to_string(), Value::Array(items));
    Value::Object(doc)
}

/// Serialize `value` as pretty JSON to `path`, creating parent directories.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), BuildError> {
    let body = serde_json::to_string_pretty(value).map_err(|e| BuildError::Serialize {
        path: path.to_path_buf(),
        source: e,
    })?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
    }

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, body).map_err(|e| BuildError::io(&temp_path, e))?;
    fs::rename(&temp_path, path).map_err(|e| BuildError::io(path, e))?;
    Ok(())
}
