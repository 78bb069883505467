use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;

use crate::models::{ClassifiedToken, Document, DocumentOutcome, PersonCounts};

/// Output column with the classification trace
pub const TRACE_COLUMN: &str = "personclassified";
pub const FIRST_PERSON_COLUMN: &str = "firstpersonpercent";
pub const THIRD_PERSON_COLUMN: &str = "thirdpersonpercent";

/// Serialize a trace as a JSON array of `[text, tag, manual_person, model_person]`
pub fn trace_json(classified: &[ClassifiedToken]) -> Result<String> {
    let trace: Vec<_> = classified.iter().map(ClassifiedToken::trace).collect();
    serde_json::to_string(&trace).context("Failed to serialize classification trace")
}

/// Write one output row per document, in the order given
///
/// Failed documents keep their passthrough columns and get empty result cells.
pub fn write_results<W: Write>(
    writer: W,
    passthrough_columns: &[String],
    outcomes: &[DocumentOutcome],
) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);

    let mut header: Vec<&str> = passthrough_columns.iter().map(String::as_str).collect();
    header.extend([TRACE_COLUMN, FIRST_PERSON_COLUMN, THIRD_PERSON_COLUMN]);
    writer.write_record(&header).context("Failed to write CSV header")?;

    for outcome in outcomes {
        let mut row: Vec<String> = match outcome {
            DocumentOutcome::Classified(doc) => passthrough_values(&doc.passthrough),
            DocumentOutcome::Failed { record, .. } => passthrough_values(&record.passthrough),
        };

        match outcome.document() {
            Some(doc) => {
                row.push(trace_json(&doc.classified)?);
                row.push(format!("{:.2}", doc.first_person_percent));
                row.push(format!("{:.2}", doc.third_person_percent));
            }
            None => row.extend(std::iter::repeat_n(String::new(), 3)),
        }

        writer
            .write_record(&row)
            .with_context(|| format!("Failed to write row for document {}", outcome.id()))?;
    }

    writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Write the result CSV to a file
pub fn write_results_file(
    path: &Path,
    passthrough_columns: &[String],
    outcomes: &[DocumentOutcome],
) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    write_results(file, passthrough_columns, outcomes)
}

fn passthrough_values(passthrough: &[(String, String)]) -> Vec<String> {
    passthrough.iter().map(|(_, value)| value.clone()).collect()
}

/// Machine-readable report of a whole run
#[derive(Debug, Clone, Serialize)]
pub struct CorpusReport {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub metadata: CorpusMetadata,
    pub documents: Vec<Document>,
    pub failures: Vec<DocumentFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CorpusMetadata {
    pub total_documents: usize,
    pub failed_documents: usize,
    /// Token counters summed over all classified documents
    pub totals: PersonCounts,
    pub mean_first_person_percent: f64,
    pub mean_third_person_percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentFailure {
    pub id: String,
    pub error: String,
}

impl CorpusMetadata {
    pub fn from_outcomes(outcomes: &[DocumentOutcome]) -> Self {
        let documents: Vec<&Document> = outcomes.iter().filter_map(|o| o.document()).collect();

        let mut totals = PersonCounts::default();
        for doc in &documents {
            totals.total += doc.counts.total;
            totals.first += doc.counts.first;
            totals.third += doc.counts.third;
            totals.conflicts += doc.counts.conflicts;
        }

        let (mean_first, mean_third) = if documents.is_empty() {
            (0.0, 0.0)
        } else {
            let n = documents.len() as f64;
            (
                documents.iter().map(|d| d.first_person_percent).sum::<f64>() / n,
                documents.iter().map(|d| d.third_person_percent).sum::<f64>() / n,
            )
        };

        Self {
            total_documents: outcomes.len(),
            failed_documents: outcomes.len() - documents.len(),
            totals,
            mean_first_person_percent: mean_first,
            mean_third_person_percent: mean_third,
        }
    }
}

impl CorpusReport {
    pub fn new(run_id: String, started_at: DateTime<Utc>, outcomes: &[DocumentOutcome]) -> Self {
        let mut documents = Vec::new();
        let mut failures = Vec::new();

        for outcome in outcomes {
            match outcome {
                DocumentOutcome::Classified(doc) => documents.push(doc.clone()),
                DocumentOutcome::Failed { record, error } => failures.push(DocumentFailure {
                    id: record.id.clone(),
                    error: error.clone(),
                }),
            }
        }

        Self {
            run_id,
            started_at,
            metadata: CorpusMetadata::from_outcomes(outcomes),
            documents,
            failures,
        }
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }
}
