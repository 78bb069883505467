use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use crate::io::{write_results_file, CorpusReport};
use crate::models::DocumentOutcome;

/// Configuration for Stage 3 rendering
#[derive(Debug, Clone)]
pub struct Stage3Config {
    /// Whether to write the result CSV
    pub generate_table: bool,
    /// Whether to write the JSON report
    pub generate_report: bool,
}

impl Default for Stage3Config {
    fn default() -> Self {
        Self {
            generate_table: true,
            generate_report: true,
        }
    }
}

/// Result of Stage 3 rendering
#[derive(Debug)]
pub struct Stage3Result {
    /// Path to the result CSV (if written)
    pub table_path: Option<PathBuf>,
    /// Path to the JSON report (if written)
    pub report_path: Option<PathBuf>,
}

/// Execute Stage 3: Rendering
///
/// Produces two views of the run:
/// 1. Result table: source rows with the trace and both percentages
/// 2. Report: JSON with corpus totals, every document and every failure
pub fn execute_stage3(
    outcomes: &[DocumentOutcome],
    passthrough_columns: &[String],
    report: Option<CorpusReport>,
    table_output: Option<&Path>,
    report_output: Option<&Path>,
    config: &Stage3Config,
) -> Result<Stage3Result> {
    let mut result = Stage3Result {
        table_path: None,
        report_path: None,
    };

    if config.generate_table {
        if let Some(path) = table_output {
            info!("Writing result table to {:?}", path);
            write_results_file(path, passthrough_columns, outcomes)?;
            result.table_path = Some(path.to_path_buf());
        }
    }

    if config.generate_report {
        if let (Some(path), Some(report)) = (report_output, report) {
            info!("Writing report to {:?}", path);
            report.write_json(path)?;
            result.report_path = Some(path.to_path_buf());
        }
    }

    Ok(result)
}
