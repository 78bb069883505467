use serde::{Deserialize, Serialize};

use super::ClassifiedToken;

/// Counters collected while aggregating one document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonCounts {
    /// Informative tokens (the denominator)
    pub total: usize,
    pub first: usize,
    pub third: usize,
    /// Tokens where rules and tagger disagreed
    pub conflicts: usize,
}

/// First- and third-person shares of a document, rounded to 2 decimals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonShares {
    pub first_person_percent: f64,
    pub third_person_percent: f64,
}

/// A source record as read from the record store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Document identifier
    pub id: String,
    /// Essay text to tag - empty when the cell was missing
    pub text: String,
    /// Columns carried through to the output unchanged, in source order
    pub passthrough: Vec<(String, String)>,
}

/// A fully classified document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(skip)]
    pub passthrough: Vec<(String, String)>,
    /// Tokens that passed the inclusion filter, in text order
    pub classified: Vec<ClassifiedToken>,
    pub first_person_percent: f64,
    pub third_person_percent: f64,
    pub counts: PersonCounts,
}

impl Document {
    pub fn new(record: SourceRecord, classified: Vec<ClassifiedToken>, counts: PersonCounts, shares: PersonShares) -> Self {
        Self {
            id: record.id,
            passthrough: record.passthrough,
            classified,
            first_person_percent: shares.first_person_percent,
            third_person_percent: shares.third_person_percent,
            counts,
        }
    }
}

/// Outcome of running one document through the pipeline
#[derive(Debug, Clone)]
pub enum DocumentOutcome {
    Classified(Document),
    /// Tagging failed; the record is kept so it can still be written out
    Failed {
        record: SourceRecord,
        error: String,
    },
}

impl DocumentOutcome {
    pub fn id(&self) -> &str {
        match self {
            DocumentOutcome::Classified(doc) => &doc.id,
            DocumentOutcome::Failed { record, .. } => &record.id,
        }
    }

    pub fn document(&self) -> Option<&Document> {
        match self {
            DocumentOutcome::Classified(doc) => Some(doc),
            DocumentOutcome::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, DocumentOutcome::Failed { .. })
    }
}
