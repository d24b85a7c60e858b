//! Supporters derived from embedded subscription records.
//!
//! Any token, network, app or organization document carrying a non-null
//! `subscription` becomes one supporter. Sources are read through the run's
//! source cache, so this step sees exactly the files the domain steps saw.

use super::networks::load_networks;
use super::{BuildContext, BuildStep, Domain, StepReport};
use crate::collate::sort_by_display_key;
use crate::document::{DocumentExt, RawDocument};
use crate::error::BuildError;
use crate::loader::LoadWarning;
use crate::output::{listing_document, write_json};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SupporterType {
    Token,
    Network,
    App,
    Organization,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Supporter {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SupporterType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<i64>,
    pub name: String,
    /// Sources carry no start date; this mirrors `expires_at`.
    pub started_at: String,
    pub current_tier: i64,
    pub expires_at: String,
}

impl Supporter {
    /// Supporter for `doc`, or `None` when it has no subscription.
    pub fn from_document(kind: SupporterType, doc: &RawDocument) -> Option<Self> {
        let subscription = doc.present_field("subscription")?;

        let (id, chain_id, name) = match kind {
            SupporterType::Token => (
                doc.text_field("address"),
                doc.int_field("chainId"),
                format!("{} ({})", doc.text_field("name"), doc.text_field("symbol")),
            ),
            SupporterType::Network => {
                let id = match doc.text_field("chainId") {
                    id if id.is_empty() => "0".to_string(),
                    id => id,
                };
                (id, doc.int_field("chainId"), doc.text_field("name"))
            }
            SupporterType::App | SupporterType::Organization => {
                (doc.text_field("id"), None, doc.text_field("name"))
            }
        };

        let expires_at = subscription.text_field("expiresAt");
        Some(Supporter {
            id,
            kind,
            chain_id,
            name,
            started_at: expires_at.clone(),
            current_tier: subscription.int_field("tier").unwrap_or(0),
            expires_at,
        })
    }
}

/// Scan tokens, networks, apps and organizations, in that order, and return the
/// supporters sorted by name.
pub fn derive_supporters(
    ctx: &BuildContext<'_>,
) -> Result<(Vec<Supporter>, Vec<LoadWarning>), BuildError> {
    let source = &ctx.layout.source;
    let mut warnings = Vec::new();
    let mut supporters = Vec::new();

    let mut collect = |kind: SupporterType, docs: Vec<RawDocument>, found: Vec<LoadWarning>| {
        supporters.extend(docs.iter().filter_map(|doc| Supporter::from_document(kind, doc)));
        warnings.extend(found);
    };

    let tokens = ctx.sources.load_tree(&source.tokens_dir())?;
    collect(SupporterType::Token, tokens.documents, tokens.warnings);

    let (networks, network_warnings) = load_networks(ctx.sources, &source.networks_file())?;
    collect(SupporterType::Network, networks, network_warnings);

    let apps = ctx.sources.load_tree(&source.apps_dir())?;
    collect(SupporterType::App, apps.documents, apps.warnings);

    let orgs = ctx.sources.load_tree(&source.orgs_dir())?;
    collect(SupporterType::Organization, orgs.documents, orgs.warnings);

    sort_by_display_key(&mut supporters, |s| s.name.as_str());
    Ok((supporters, warnings))
}

pub struct SupportersStep;

impl BuildStep for SupportersStep {
    fn domain(&self) -> Domain {
        Domain::Supporters
    }

    fn run(&self, ctx: &BuildContext<'_>) -> Result<StepReport, BuildError> {
        let (supporters, warnings) = derive_supporters(ctx)?;
        let path = ctx.layout.output.domain_file(Domain::Supporters);

        let items = supporters
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| BuildError::Serialize {
                path: path.clone(),
                source: e,
            })?;

        let count = items.len();
        write_json(&path, &listing_document(None, "supporters", items))?;
        info!(count, "Built supporters.json");

        Ok(StepReport {
            domain: Domain::Supporters,
            count,
            files: vec![path],
            warnings,
        })
    }
}
