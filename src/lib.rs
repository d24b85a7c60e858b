//! Metadist: Static Metadata Distribution Builder
//!
//! Reads a tree of hand-curated JSON metadata (addresses, events, tokens,
//! networks, apps, organizations, donations), aggregates it per domain and per
//! chain into sorted listing files, derives the supporters list, copies static
//! profile and asset trees, and writes a build manifest.

pub mod aggregate;
pub mod cli;
pub mod collate;
pub mod config;
pub mod document;
pub mod error;
pub mod layout;
pub mod loader;
pub mod logging;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod static_copy;
