//! CLI domain: parse, route, and presentation only.
//! Build orchestration lives in [`crate::pipeline`].

mod parse;
mod presentation;
mod route;

pub use parse::Cli;
pub use presentation::{format_summary_json, format_summary_text, map_error};
pub use route::RunContext;
