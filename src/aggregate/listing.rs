//! Flat listings: apps and organizations.

use super::{BuildContext, BuildStep, Domain, StepReport};
use crate::collate::sort_by_display_key;
use crate::document::DocumentExt;
use crate::error::BuildError;
use crate::layout::SourceLayout;
use crate::output::{listing_document, write_json};
use std::path::PathBuf;
use tracing::info;

/// Every document under one source tree, sorted by `name`, written to one file
/// even when empty.
pub struct ListingStep {
    domain: Domain,
    source_dir: fn(&SourceLayout) -> PathBuf,
}

impl ListingStep {
    pub fn apps() -> Self {
        Self {
            domain: Domain::Apps,
            source_dir: SourceLayout::apps_dir,
        }
    }

    pub fn organizations() -> Self {
        Self {
            domain: Domain::Organizations,
            source_dir: SourceLayout::orgs_dir,
        }
    }
}

impl BuildStep for ListingStep {
    fn domain(&self) -> Domain {
        self.domain
    }

    fn run(&self, ctx: &BuildContext<'_>) -> Result<StepReport, BuildError> {
        let loaded = ctx.sources.load_tree(&(self.source_dir)(&ctx.layout.source))?;
        let mut items = loaded.documents;
        sort_by_display_key(&mut items, |doc| doc.str_field("name"));

        let count = items.len();
        let path = ctx.layout.output.domain_file(self.domain);
        write_json(&path, &listing_document(None, self.domain.as_str(), items))?;
        info!(domain = %self.domain, count, "Built {}.json", self.domain);

        Ok(StepReport {
            domain: self.domain,
            count,
            files: vec![path],
            warnings: loaded.warnings,
        })
    }
}
