//! Build summary presentation: text table and JSON.

use crate::aggregate::Domain;
use crate::error::BuildError;
use crate::pipeline::BuildSummary;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::{CellAlignment, Table};
use owo_colors::OwoColorize;

/// Map build errors to a string for CLI output.
pub fn map_error(e: &BuildError) -> String {
    format!("Build failed: {}", e)
}

pub fn format_summary_text(summary: &BuildSummary) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Domain", "Items", "Files"]);
    for report in &summary.steps {
        table.add_row(vec![
            report.domain.to_string(),
            report.count.to_string(),
            report.files.len().to_string(),
        ]);
    }
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    let mut output = format!(
        "{} {} (version {})\n",
        "Build complete:".green().bold(),
        summary.output_dir.display(),
        summary.manifest.version
    );
    output.push_str(&table.to_string());
    output.push_str(&format!(
        "\nStatic files copied: {}\nManifest: {} items across {} domains",
        summary.static_files.files,
        Domain::ALL.iter().map(|d| summary.count(*d)).sum::<usize>(),
        Domain::ALL.len()
    ));

    if !summary.warnings.is_empty() {
        output.push_str(&format!(
            "\n\n{}",
            format!("Warnings ({}):", summary.warnings.len()).yellow()
        ));
        for warning in &summary.warnings {
            output.push_str(&format!("\n  - {}", warning));
        }
    }
    output
}

pub fn format_summary_json(summary: &BuildSummary) -> Result<String, BuildError> {
    serde_json::to_string_pretty(summary).map_err(|e| BuildError::Serialize {
        path: summary.output_dir.clone(),
        source: e,
    })
}
