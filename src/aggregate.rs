//! Domain aggregators.
//!
//! Each domain is one [`BuildStep`]: it reads its sources through the run's
//! [`SourceCache`], applies the domain's merge and sort rule, writes its output
//! file(s), and hands back a [`StepReport`] with the item count and any
//! per-file warnings. Steps share nothing but the read-only [`BuildContext`].

use crate::error::BuildError;
use crate::layout::BuildLayout;
use crate::loader::{LoadWarning, SourceCache};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

pub mod chains;
pub mod donations;
pub mod events;
pub mod listing;
pub mod networks;
pub mod supporters;

pub use chains::ChainListingStep;
pub use donations::DonationsStep;
pub use events::EventsStep;
pub use listing::ListingStep;
pub use networks::NetworksStep;
pub use supporters::{Supporter, SupporterType, SupportersStep};

/// A category of metadata. Also names the output file or directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Addresses,
    Events,
    Tokens,
    Networks,
    Apps,
    Organizations,
    Supporters,
    Donations,
}

impl Domain {
    /// Build order.
    pub const ALL: [Domain; 8] = [
        Domain::Addresses,
        Domain::Events,
        Domain::Tokens,
        Domain::Networks,
        Domain::Apps,
        Domain::Organizations,
        Domain::Supporters,
        Domain::Donations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Addresses => "addresses",
            Domain::Events => "events",
            Domain::Tokens => "tokens",
            Domain::Networks => "networks",
            Domain::Apps => "apps",
            Domain::Organizations => "organizations",
            Domain::Supporters => "supporters",
            Domain::Donations => "donations",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only inputs for a build step.
pub struct BuildContext<'a> {
    pub layout: &'a BuildLayout,
    pub sources: &'a SourceCache,
}

impl<'a> BuildContext<'a> {
    pub fn new(layout: &'a BuildLayout, sources: &'a SourceCache) -> Self {
        Self { layout, sources }
    }
}

/// What one step produced.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub domain: Domain,
    pub count: usize,
    pub files: Vec<PathBuf>,
    pub warnings: Vec<LoadWarning>,
}

impl StepReport {
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            count: 0,
            files: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// One named unit of the build.
pub trait BuildStep {
    fn domain(&self) -> Domain;

    fn run(&self, ctx: &BuildContext<'_>) -> Result<StepReport, BuildError>;
}

/// The aggregators in build order.
pub fn default_steps() -> Vec<Box<dyn BuildStep>> {
    vec![
        Box::new(ChainListingStep::addresses()),
        Box::new(EventsStep),
        Box::new(ChainListingStep::tokens()),
        Box::new(NetworksStep),
        Box::new(ListingStep::apps()),
        Box::new(ListingStep::organizations()),
        Box::new(SupportersStep),
        Box::new(DonationsStep),
    ]
}
