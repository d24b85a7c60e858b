//! Integration tests for the metadist build pipeline and CLI

mod pipeline_build;
