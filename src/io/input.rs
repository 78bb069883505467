use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;

use crate::models::SourceRecord;

/// Column holding the essay text in the source data
pub const DEFAULT_TEXT_COLUMN: &str = "fu_ensayo_2";

/// Experimental-condition label, staging only
pub const DEFAULT_DROPPED_COLUMN: &str = "treat";

/// How source rows map to documents
#[derive(Debug, Clone)]
pub struct RecordConfig {
    /// Column with the text to tag; never carried to the output
    pub text_column: String,
    /// Column used as the document id; rows are numbered when unset
    pub id_column: Option<String>,
    /// Further columns left out of the output
    pub dropped_columns: Vec<String>,
}

impl Default for RecordConfig {
    fn default() -> Self {
        Self {
            text_column: DEFAULT_TEXT_COLUMN.to_string(),
            id_column: None,
            dropped_columns: vec![DEFAULT_DROPPED_COLUMN.to_string()],
        }
    }
}

/// Source rows of a CSV file together with the columns passed through
#[derive(Debug, Clone)]
pub struct RecordSet {
    /// Passthrough column names, in source order
    pub passthrough_columns: Vec<String>,
    pub records: Vec<SourceRecord>,
}

/// Read a CSV file of essays into source records
pub fn read_records_file(path: &Path, config: &RecordConfig) -> Result<RecordSet> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open file: {:?}", path))?;
    read_records(file, config)
}

/// Read CSV data with a header row into source records
pub fn read_records<R: Read>(reader: R, config: &RecordConfig) -> Result<RecordSet> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = reader
        .headers()
        .context("Failed to read CSV header row")?
        .clone();

    let Some(text_index) = headers.iter().position(|h| h == config.text_column) else {
        bail!("Text column {:?} not found in CSV header", config.text_column);
    };

    let id_index = match &config.id_column {
        Some(name) => match headers.iter().position(|h| h == name) {
            Some(index) => Some(index),
            None => bail!("Id column {:?} not found in CSV header", name),
        },
        None => None,
    };

    let passthrough: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(i, h)| {
            *i != text_index && !config.dropped_columns.iter().any(|d| d.as_str() == *h)
        })
        .map(|(i, h)| (i, h.to_string()))
        .collect();

    let mut records = Vec::new();

    for (row, result) in reader.records().enumerate() {
        // +2: 1-indexed plus the header row
        let record = result.with_context(|| format!("Failed to parse CSV line {}", row + 2))?;

        let id = id_index
            .and_then(|i| record.get(i))
            .map(str::to_string)
            .unwrap_or_else(|| format!("row_{}", row + 1));

        records.push(SourceRecord {
            id,
            text: record.get(text_index).unwrap_or("").to_string(),
            passthrough: passthrough
                .iter()
                .map(|(i, name)| (name.clone(), record.get(*i).unwrap_or("").to_string()))
                .collect(),
        });
    }

    Ok(RecordSet {
        passthrough_columns: passthrough.into_iter().map(|(_, name)| name).collect(),
        records,
    })
}
