//! Property-based tests for ordering and counting rules

mod collation;
mod event_counts;
