//! Per-chain event bundles.
//!
//! `data/events/<chainId>/common.json` holds events shared by every address on
//! the chain; every other `<address>.json` next to it holds that address's own
//! events. Both maps are copied verbatim into `events/<chainId>.json`.

use super::{BuildContext, BuildStep, Domain, StepReport};
use crate::error::BuildError;
use crate::loader::{chain_dirs, json_files, JsonFile, LoadWarning, SourceCache};
use crate::output::{timestamp_now, write_json};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const COMMON_FILE: &str = "common.json";

/// Events for one chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventBundle {
    /// Event name to event data, shared across the chain
    pub common: Map<String, Value>,
    /// Address to (event name to event data); every value is an object
    pub addresses: Map<String, Value>,
}

impl EventBundle {
    /// Shared events plus every address-specific event.
    pub fn count(&self) -> usize {
        let per_address: usize = self
            .addresses
            .values()
            .map(|events| events.as_object().map_or(0, Map::len))
            .sum();
        self.common.len() + per_address
    }

    fn into_document(self, chain_id: u64) -> Value {
        let count = self.count();
        let mut doc = Map::new();
        doc.insert("chainId".to_string(), Value::from(chain_id));
        doc.insert("updatedAt".to_string(), Value::from(timestamp_now()));
        doc.insert("count".to_string(), Value::from(count));
        doc.insert("common".to_string(), Value::Object(self.common));
        doc.insert("addresses".to_string(), Value::Object(self.addresses));
        Value::Object(doc)
    }
}

/// Read one chain directory into a bundle. Unusable files come back as warnings.
pub fn load_event_bundle(
    sources: &SourceCache,
    chain_dir: &Path,
) -> Result<(EventBundle, Vec<LoadWarning>), BuildError> {
    let mut bundle = EventBundle::default();
    let mut warnings = Vec::new();

    if let Some(common) = read_event_map(sources, &chain_dir.join(COMMON_FILE), &mut warnings)? {
        bundle.common = common;
    }

    for path in json_files(chain_dir, Some(1))? {
        if path.file_name().and_then(|n| n.to_str()) == Some(COMMON_FILE) {
            continue;
        }
        let Some(address) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
            continue;
        };
        if let Some(events) = read_event_map(sources, &path, &mut warnings)? {
            bundle.addresses.insert(address, Value::Object(events));
        }
    }

    Ok((bundle, warnings))
}

fn read_event_map(
    sources: &SourceCache,
    path: &Path,
    warnings: &mut Vec<LoadWarning>,
) -> Result<Option<Map<String, Value>>, BuildError> {
    match sources.read_json(path)? {
        JsonFile::Missing => Ok(None),
        JsonFile::Parsed(Value::Object(map)) => Ok(Some(map)),
        JsonFile::Parsed(_) => {
            warnings.push(LoadWarning::new(path, "expected a JSON object of events"));
            Ok(None)
        }
        JsonFile::Malformed(warning) => {
            warnings.push(warning);
            Ok(None)
        }
    }
}

pub struct EventsStep;

impl BuildStep for EventsStep {
    fn domain(&self) -> Domain {
        Domain::Events
    }

    fn run(&self, ctx: &BuildContext<'_>) -> Result<StepReport, BuildError> {
        let output_dir = ctx.layout.output.domain_dir(Domain::Events);
        fs::create_dir_all(&output_dir).map_err(|e| BuildError::io(&output_dir, e))?;

        let mut report = StepReport::new(Domain::Events);

        for chain in chain_dirs(&ctx.layout.source.events_dir())? {
            let (bundle, warnings) = load_event_bundle(ctx.sources, &chain.path)?;
            report.warnings.extend(warnings);

            let count = bundle.count();
            if count == 0 {
                debug!(chain_id = chain.chain_id, "No events, skipping chain");
                continue;
            }

            let common = bundle.common.len();
            let addresses = bundle.addresses.len();
            let path = ctx.layout.output.chain_file(Domain::Events, chain.chain_id);
            write_json(&path, &bundle.into_document(chain.chain_id))?;

            info!(
                chain_id = chain.chain_id,
                common,
                addresses,
                count,
                "Built events/{}.json",
                chain.chain_id
            );
            report.count += count;
            report.files.push(path);
        }

        Ok(report)
    }
}
