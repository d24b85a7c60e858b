//! Network listing from the single `networks.json` source.

use super::{BuildContext, BuildStep, Domain, StepReport};
use crate::document::{DocumentExt, RawDocument};
use crate::error::BuildError;
use crate::loader::{JsonFile, LoadWarning, SourceCache};
use crate::output::{listing_document, write_json};
use serde_json::Value;
use std::path::Path;
use tracing::info;

/// The `networks` array of the networks file, in file order.
///
/// A missing file or missing field is an empty list. A malformed file, or a
/// `networks` field that is not an array, is an empty list plus a warning.
pub fn load_networks(
    sources: &SourceCache,
    path: &Path,
) -> Result<(Vec<RawDocument>, Vec<LoadWarning>), BuildError> {
    match sources.read_json(path)? {
        JsonFile::Missing => Ok((Vec::new(), Vec::new())),
        JsonFile::Malformed(warning) => Ok((Vec::new(), vec![warning])),
        JsonFile::Parsed(content) => match content.get("networks") {
            None | Some(Value::Null) => Ok((Vec::new(), Vec::new())),
            Some(Value::Array(networks)) => Ok((networks.clone(), Vec::new())),
            Some(_) => Ok((
                Vec::new(),
                vec![LoadWarning::new(path, "`networks` is not an array")],
            )),
        },
    }
}

pub struct NetworksStep;

impl BuildStep for NetworksStep {
    fn domain(&self) -> Domain {
        Domain::Networks
    }

    fn run(&self, ctx: &BuildContext<'_>) -> Result<StepReport, BuildError> {
        let (mut networks, warnings) =
            load_networks(ctx.sources, &ctx.layout.source.networks_file())?;

        // Stable: equal chain ids keep file order.
        networks.sort_by_key(|network| network.int_field("chainId").unwrap_or(0));

        let count = networks.len();
        let path = ctx.layout.output.domain_file(Domain::Networks);
        write_json(&path, &listing_document(None, "networks", networks))?;
        info!(count, "Built networks.json");

        Ok(StepReport {
            domain: Domain::Networks,
            count,
            files: vec![path],
            warnings,
        })
    }
}
