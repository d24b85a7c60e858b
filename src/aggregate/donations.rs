//! Donations pass-through: `data/donations.json` is re-serialized unchanged.

use super::{BuildContext, BuildStep, Domain, StepReport};
use crate::document::DocumentExt;
use crate::error::BuildError;
use crate::loader::JsonFile;
use crate::output::write_json;
use tracing::{debug, info};

pub struct DonationsStep;

impl BuildStep for DonationsStep {
    fn domain(&self) -> Domain {
        Domain::Donations
    }

    fn run(&self, ctx: &BuildContext<'_>) -> Result<StepReport, BuildError> {
        let source = ctx.layout.source.donations_file();
        let mut report = StepReport::new(Domain::Donations);

        match ctx.sources.read_json(&source)? {
            JsonFile::Missing => debug!(path = %source.display(), "No donations file"),
            JsonFile::Malformed(warning) => report.warnings.push(warning),
            JsonFile::Parsed(content) => {
                let path = ctx.layout.output.domain_file(Domain::Donations);
                write_json(&path, &content)?;
                report.count = content.array_len("donations");
                report.files.push(path);
                info!(count = report.count, "Built donations.json");
            }
        }

        Ok(report)
    }
}
