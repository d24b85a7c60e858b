//! Chain-partitioned listings: addresses and tokens.
//!
//! `data/<domain>/<chainId>/**/*.json` becomes `<domain>/<chainId>.json`, one
//! file per chain that has at least one parsable document.

use super::{BuildContext, BuildStep, Domain, StepReport};
use crate::collate::sort_by_display_key;
use crate::document::DocumentExt;
use crate::error::BuildError;
use crate::layout::SourceLayout;
use crate::loader::chain_dirs;
use crate::output::{listing_document, write_json};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

pub struct ChainListingStep {
    domain: Domain,
    source_dir: fn(&SourceLayout) -> PathBuf,
    /// Sort by the first non-empty of these fields
    sort_keys: &'static [&'static str],
}

impl ChainListingStep {
    pub fn addresses() -> Self {
        Self {
            domain: Domain::Addresses,
            source_dir: SourceLayout::addresses_dir,
            sort_keys: &["label", "address"],
        }
    }

    pub fn tokens() -> Self {
        Self {
            domain: Domain::Tokens,
            source_dir: SourceLayout::tokens_dir,
            sort_keys: &["name"],
        }
    }
}

impl BuildStep for ChainListingStep {
    fn domain(&self) -> Domain {
        self.domain
    }

    fn run(&self, ctx: &BuildContext<'_>) -> Result<StepReport, BuildError> {
        let output_dir = ctx.layout.output.domain_dir(self.domain);
        fs::create_dir_all(&output_dir).map_err(|e| BuildError::io(&output_dir, e))?;

        let mut report = StepReport::new(self.domain);
        let source_dir = (self.source_dir)(&ctx.layout.source);

        for chain in chain_dirs(&source_dir)? {
            let loaded = ctx.sources.load_tree(&chain.path)?;
            report.warnings.extend(loaded.warnings);

            let mut items = loaded.documents;
            if items.is_empty() {
                debug!(domain = %self.domain, chain_id = chain.chain_id, "No documents, skipping chain");
                continue;
            }

            let sort_keys = self.sort_keys;
            sort_by_display_key(&mut items, |doc| doc.first_str_field(sort_keys));

            let count = items.len();
            let path = ctx.layout.output.chain_file(self.domain, chain.chain_id);
            let doc = listing_document(Some(chain.chain_id), self.domain.as_str(), items);
            write_json(&path, &doc)?;

            info!(
                domain = %self.domain,
                chain_id = chain.chain_id,
                count,
                "Built {}/{}.json",
                self.domain,
                chain.chain_id
            );
            report.count += count;
            report.files.push(path);
        }

        Ok(report)
    }
}
