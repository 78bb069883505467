use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::models::{Document, DocumentOutcome, SourceRecord, Token};
use crate::stages::{execute_stage0, execute_stage1, execute_stage2};
use crate::tagger::Tagger;

/// Configuration for a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum number of documents tagged at the same time
    pub concurrency: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { concurrency: 8 }
    }
}

/// Classify and aggregate one tagged document
///
/// Pure: the same tokens always yield the same document.
pub fn classify_document(record: SourceRecord, tokens: &[Token]) -> Document {
    let stage1 = execute_stage1(tokens);
    let (counts, shares) = execute_stage2(&stage1.classified);

    debug!(
        "Document {}: {} informative of {} tokens, first={:.2} third={:.2}, {} conflicts",
        record.id,
        counts.total,
        tokens.len(),
        shares.first_person_percent,
        shares.third_person_percent,
        stage1.conflicts_resolved
    );

    Document::new(record, stage1.classified, counts, shares)
}

/// Run one document through tagging, classification and aggregation
pub async fn process_document<T: Tagger>(tagger: &T, record: SourceRecord) -> DocumentOutcome {
    match execute_stage0(tagger, &record).await {
        Ok(tokens) => DocumentOutcome::Classified(classify_document(record, &tokens)),
        Err(e) => {
            warn!("Document {} failed: {}", record.id, e);
            DocumentOutcome::Failed {
                error: e.to_string(),
                record,
            }
        }
    }
}

/// Run the whole corpus through the pipeline
///
/// Each document is processed in its own task, at most
/// `config.concurrency` at a time. Outcomes come back in input order, and a
/// failing document never stops the others.
pub async fn run_pipeline<T: Tagger + 'static>(
    tagger: Arc<T>,
    records: Vec<SourceRecord>,
    config: &PipelineConfig,
) -> Vec<DocumentOutcome> {
    let semaphore = Arc::new(Semaphore::new(config.concurrency.max(1)));

    info!(
        "Processing {} documents (concurrency {})",
        records.len(),
        config.concurrency.max(1)
    );

    let handles: Vec<_> = records
        .iter()
        .cloned()
        .map(|record| {
            let tagger = Arc::clone(&tagger);
            let semaphore = Arc::clone(&semaphore);
            tokio::spawn(async move {
                // The semaphore is never closed
                let _permit = semaphore.acquire_owned().await.ok();
                process_document(tagger.as_ref(), record).await
            })
        })
        .collect();

    let mut outcomes = Vec::with_capacity(handles.len());
    for (handle, record) in handles.into_iter().zip(records) {
        match handle.await {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => {
                warn!("Document {} task aborted: {}", record.id, e);
                outcomes.push(DocumentOutcome::Failed {
                    error: format!("task aborted: {}", e),
                    record,
                });
            }
        }
    }

    let failed = outcomes.iter().filter(|o| o.is_failed()).count();
    info!(
        "Pipeline complete: {} classified, {} failed",
        outcomes.len() - failed,
        failed
    );

    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagger::{PretaggedTagger, TagError};

    fn record(id: &str, text: &str) -> SourceRecord {
        SourceRecord {
            id: id.to_string(),
            text: text.to_string(),
            passthrough: vec![],
        }
    }

    fn tagger() -> PretaggedTagger {
        let mut tagger = PretaggedTagger::new();
        tagger.insert(
            "Yo comimos.",
            vec![
                Token::from_triple("yo", "PRON", ""),
                Token::from_triple("comimos", "VERB", ""),
                Token::from_triple(".", "PUNCT", ""),
            ],
        );
        tagger.insert(
            "Ellos hablan de su casa.",
            vec![
                Token::from_triple("Ellos", "PRON", "Case=Nom|Gender=Masc|Number=Plur|Person=3|PronType=Prs"),
                Token::from_triple("hablan", "VERB", "Mood=Ind|Number=Plur|Person=3|Tense=Pres|VerbForm=Fin"),
                Token::from_triple("de", "ADP", ""),
                Token::from_triple("su", "DET", "Number=Sing|Number[psor]=Sing|Person=3|Poss=Yes|PronType=Prs"),
                Token::from_triple("casa", "NOUN", "Gender=Fem|Number=Sing"),
                Token::from_triple(".", "PUNCT", "PunctType=Peri"),
            ],
        );
        tagger.insert(
            "Muy bien.",
            vec![
                Token::from_triple("Muy", "ADV", ""),
                Token::from_triple("bien", "ADV", ""),
                Token::from_triple(".", "PUNCT", ""),
            ],
        );
        tagger
    }

    /// Tagger that always fails
    struct BrokenTagger;

    impl Tagger for BrokenTagger {
        async fn tag(&self, text: &str) -> Result<Vec<Token>, TagError> {
            Err(TagError::UnknownDocument(text.to_string()))
        }
    }

    #[tokio::test]
    async fn test_first_person_document() {
        let outcome = process_document(&tagger(), record("a", "Yo comimos.")).await;
        let doc = outcome.document().unwrap();

        assert_eq!(doc.classified.len(), 2);
        assert_eq!(doc.counts.total, 2);
        assert_eq!(doc.first_person_percent, 1.0);
        assert_eq!(doc.third_person_percent, 0.0);
    }

    #[tokio::test]
    async fn test_document_without_person_words() {
        let outcome = process_document(&tagger(), record("b", "Muy bien.")).await;
        let doc = outcome.document().unwrap();

        assert!(doc.classified.is_empty());
        assert_eq!(doc.first_person_percent, 0.0);
        assert_eq!(doc.third_person_percent, 0.0);
    }

    #[tokio::test]
    async fn test_empty_text_is_not_a_failure() {
        let outcome = process_document(&BrokenTagger, record("c", "")).await;
        let doc = outcome.document().unwrap();

        assert_eq!(doc.counts.total, 0);
        assert_eq!(doc.first_person_percent, 0.0);
    }

    #[tokio::test]
    async fn test_run_pipeline_keeps_order_and_isolates_failures() {
        let records = vec![
            record("a", "Yo comimos."),
            record("b", "Texto sin etiquetar"),
            record("c", "Ellos hablan de su casa."),
            record("d", "Muy bien."),
        ];
        let config = PipelineConfig { concurrency: 2 };

        let outcomes = run_pipeline(Arc::new(tagger()), records, &config).await;

        let ids: Vec<&str> = outcomes.iter().map(|o| o.id()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);

        assert!(outcomes[1].is_failed());

        let third = outcomes[2].document().unwrap();
        assert_eq!(third.counts.total, 3);
        assert_eq!(third.third_person_percent, 1.0);

        for outcome in &outcomes {
            if let Some(doc) = outcome.document() {
                assert!(doc.first_person_percent + doc.third_person_percent <= 1.0);
            }
        }
    }

    #[tokio::test]
    async fn test_rerun_is_identical() {
        let records = vec![record("a", "Yo comimos."), record("c", "Ellos hablan de su casa.")];
        let tagger = Arc::new(tagger());

        let first = run_pipeline(Arc::clone(&tagger), records.clone(), &PipelineConfig::default()).await;
        let second = run_pipeline(tagger, records, &PipelineConfig { concurrency: 1 }).await;

        let docs = |outcomes: &[DocumentOutcome]| -> Vec<Document> {
            outcomes.iter().filter_map(|o| o.document().cloned()).collect()
        };
        assert_eq!(docs(&first), docs(&second));
    }

    #[tokio::test]
    async fn test_zero_concurrency_still_runs() {
        let outcomes = run_pipeline(
            Arc::new(tagger()),
            vec![record("a", "Yo comimos.")],
            &PipelineConfig { concurrency: 0 },
        )
        .await;

        assert_eq!(outcomes.len(), 1);
        assert!(!outcomes[0].is_failed());
    }
}
