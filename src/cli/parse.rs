//! CLI parse: clap types for metadist. No behavior; definitions only.

use clap::Parser;
use std::path::PathBuf;

/// Metadist CLI - rebuild the static metadata distribution
#[derive(Parser, Debug)]
#[command(name = "metadist", version)]
#[command(about = "Aggregate hand-authored metadata JSON into a static distribution")]
pub struct Cli {
    /// Input root containing data/, profiles/, assets/ and the version file
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Configuration file path (overrides <root>/metadist.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output directory (overrides paths.output_dir)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Summary format (text or json)
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Disable logging
    #[arg(long)]
    pub quiet: bool,

    /// Debug-level logging
    #[arg(long)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
